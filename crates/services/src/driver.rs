use tracing::info;

use lingo_core::model::Skill;

use crate::error::SolverError;
use crate::sessions::SessionService;

/// What one pass of the skill driver did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillReport {
    pub sessions: u32,
    pub rejected: u32,
}

/// Walks a skill lesson by lesson until its local counters reach the totals.
#[derive(Clone)]
pub struct SkillDriver {
    sessions: SessionService,
    session_limit: Option<u32>,
}

impl SkillDriver {
    #[must_use]
    pub fn new(sessions: SessionService) -> Self {
        Self {
            sessions,
            session_limit: None,
        }
    }

    /// Stop with `SolverError::SessionLimit` after this many sessions on one skill.
    #[must_use]
    pub fn with_session_limit(mut self, limit: Option<u32>) -> Self {
        self.session_limit = limit;
        self
    }

    /// Solve lessons of `skill` until it is complete.
    ///
    /// Counters advance after every submitted session, accepted or rejected.
    ///
    /// # Errors
    ///
    /// Propagates fetch, challenge and transport errors from the session
    /// service, and returns `SolverError::SessionLimit` if a limit is set and hit.
    pub async fn solve_skill(&self, skill: &mut Skill) -> Result<SkillReport, SolverError> {
        info!(skill = skill.name(), "solving skill");
        let mut report = SkillReport::default();

        while !skill.is_complete() {
            if let Some(limit) = self.session_limit {
                if report.sessions >= limit {
                    return Err(SolverError::SessionLimit {
                        skill: skill.id().clone(),
                        limit,
                    });
                }
            }

            let mut session = self
                .sessions
                .fetch_session(skill.id(), skill.position())
                .await?;
            let outcome = self.sessions.solve_session(&mut session).await?;

            report.sessions += 1;
            if !outcome.is_accepted() {
                report.rejected += 1;
            }

            skill.record_lesson();
            info!(
                lesson = skill.completed_lessons(),
                level = skill.completed_levels(),
                "advanced"
            );
        }

        info!(skill = skill.name(), sessions = report.sessions, "skill completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::api::InMemoryLearningApi;
    use crate::config::LanguagePair;
    use lingo_core::model::{LessonPosition, SkillId};
    use serde_json::json;

    fn driver(api: &InMemoryLearningApi) -> SkillDriver {
        SkillDriver::new(SessionService::new(
            Arc::new(api.clone()),
            LanguagePair::default(),
            Duration::from_millis(10),
        ))
    }

    fn api() -> InMemoryLearningApi {
        InMemoryLearningApi::new().with_challenges(vec![json!({"correctSolutions": ["ok"]})])
    }

    #[tokio::test(start_paused = true)]
    async fn walks_positions_in_order_until_complete() {
        let api = api();
        let mut skill = Skill::new(SkillId::new("s"), "Basics", 2, 1, 0, 0);

        let report = driver(&api).solve_skill(&mut skill).await.unwrap();

        assert!(skill.is_complete());
        let positions: Vec<_> = api
            .created_sessions()
            .iter()
            .map(|r| {
                let LessonPosition {
                    level_index,
                    lesson_index,
                } = r.position();
                (level_index, lesson_index)
            })
            .collect();
        assert_eq!(positions, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        assert_eq!(report.sessions, 5);
        assert_eq!(api.submissions().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn resumes_from_server_counters() {
        let api = api();
        let mut skill = Skill::new(SkillId::new("s"), "Food", 3, 2, 2, 2);

        let report = driver(&api).solve_skill(&mut skill).await.unwrap();

        // (2,2) -> (3,0) -> (3,1) -> (3,2)
        assert_eq!(report.sessions, 3);
        assert_eq!(api.created_sessions()[0].position().level_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn complete_skill_needs_no_sessions() {
        let api = api();
        let mut skill = Skill::new(SkillId::new("s"), "Done", 1, 1, 1, 1);

        let report = driver(&api).solve_skill(&mut skill).await.unwrap();

        assert_eq!(report, SkillReport::default());
        assert!(api.created_sessions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_submissions_still_advance() {
        let api = api().rejecting_submissions(403);
        let mut skill = Skill::new(SkillId::new("s"), "Travel", 1, 1, 0, 0);

        let report = driver(&api).solve_skill(&mut skill).await.unwrap();

        assert!(skill.is_complete());
        assert_eq!(report.sessions, 3);
        assert_eq!(report.rejected, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn session_limit_stops_the_walk() {
        let api = api();
        let mut skill = Skill::new(SkillId::new("s"), "Long", 5, 4, 0, 0);

        let err = driver(&api)
            .with_session_limit(Some(2))
            .solve_skill(&mut skill)
            .await
            .unwrap_err();

        assert!(matches!(err, SolverError::SessionLimit { limit: 2, .. }));
        assert_eq!(api.created_sessions().len(), 2);
        assert_eq!(skill.completed_lessons(), 2);
    }
}
