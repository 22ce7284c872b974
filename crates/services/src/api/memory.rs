use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use lingo_core::model::{SessionId, Skill, SkillId, UserId};

use super::{LearningApi, SubmitOutcome};
use crate::error::ApiError;
use crate::sessions::SessionRequest;

#[derive(Default)]
struct MemoryState {
    users: HashMap<String, UserId>,
    skill_groups: Vec<Vec<Skill>>,
    challenges: Vec<Value>,
    next_session: u64,
    created: Vec<SessionRequest>,
    submitted: Vec<(SessionId, Value)>,
    reject_status: Option<u16>,
    failing_skills: HashSet<SkillId>,
}

/// Simple in-memory learning service for testing and dry runs.
///
/// Every created session carries a copy of the configured challenge list.
#[derive(Clone, Default)]
pub struct InMemoryLearningApi {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryLearningApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn with_user(self, username: impl Into<String>, id: UserId) -> Self {
        self.state().users.insert(username.into(), id);
        self
    }

    /// Append one group of skills to the course.
    #[must_use]
    pub fn with_skill_group(self, skills: Vec<Skill>) -> Self {
        self.state().skill_groups.push(skills);
        self
    }

    /// Challenge records handed out with every new session.
    #[must_use]
    pub fn with_challenges(self, challenges: Vec<Value>) -> Self {
        self.state().challenges = challenges;
        self
    }

    /// Answer every session update with the given status.
    #[must_use]
    pub fn rejecting_submissions(self, status: u16) -> Self {
        self.state().reject_status = Some(status);
        self
    }

    /// Fail session creation for one skill.
    #[must_use]
    pub fn failing_sessions_for(self, skill: SkillId) -> Self {
        self.state().failing_skills.insert(skill);
        self
    }

    /// Session-creation requests received so far, oldest first.
    #[must_use]
    pub fn created_sessions(&self) -> Vec<SessionRequest> {
        self.state().created.clone()
    }

    /// Session updates received so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<(SessionId, Value)> {
        self.state().submitted.clone()
    }
}

#[async_trait]
impl LearningApi for InMemoryLearningApi {
    async fn find_user_id(&self, username: &str) -> Result<Option<UserId>, ApiError> {
        Ok(self.state().users.get(username).copied())
    }

    async fn course_skills(&self, _user_id: UserId) -> Result<Vec<Vec<Skill>>, ApiError> {
        Ok(self.state().skill_groups.clone())
    }

    async fn create_session(&self, request: &SessionRequest) -> Result<Value, ApiError> {
        let mut state = self.state();
        if state.failing_skills.contains(request.skill_id()) {
            return Err(ApiError::Backend(format!(
                "session creation refused for skill {}",
                request.skill_id()
            )));
        }
        state.created.push(request.clone());
        state.next_session += 1;

        let position = request.position();
        Ok(json!({
            "id": format!("session-{}", state.next_session),
            "type": "LESSON",
            "skillId": request.skill_id(),
            "levelIndex": position.level_index,
            "levelSessionIndex": position.lesson_index,
            "challenges": state.challenges.clone(),
        }))
    }

    async fn update_session(
        &self,
        id: &SessionId,
        body: &Value,
    ) -> Result<SubmitOutcome, ApiError> {
        let mut state = self.state();
        state.submitted.push((id.clone(), body.clone()));
        Ok(match state.reject_status {
            Some(status) => SubmitOutcome::Rejected {
                status,
                body: r#"{"error":"rejected"}"#.into(),
            },
            None => SubmitOutcome::Accepted,
        })
    }
}
