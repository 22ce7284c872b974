use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use lingo_core::Clock;
use lingo_core::model::{LearningSession, LessonPosition, SkillId};

use crate::api::{LearningApi, SubmitOutcome};
use crate::config::LanguagePair;
use crate::error::SolverError;
use crate::sessions::SessionRequest;

/// Time added after the last challenge, standing in for the final review screen.
pub const FINAL_REVIEW_MS: u64 = 2000;

/// Fetches lesson sessions and submits them solved.
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn LearningApi>,
    clock: Clock,
    languages: LanguagePair,
    delay: Duration,
}

impl SessionService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, languages: LanguagePair, delay: Duration) -> Self {
        Self {
            api,
            clock: Clock::default(),
            languages,
            delay,
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn delay_ms(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Request a new lesson session at `position` of the given skill.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::SessionFetch` on transport failures and
    /// `SolverError::SessionShape` if the response is not a usable session.
    pub async fn fetch_session(
        &self,
        skill_id: &SkillId,
        position: LessonPosition,
    ) -> Result<LearningSession, SolverError> {
        let request = SessionRequest::lesson(skill_id.clone(), position, &self.languages);
        let raw = self
            .api
            .create_session(&request)
            .await
            .map_err(|source| SolverError::SessionFetch {
                skill: skill_id.clone(),
                source,
            })?;

        let session = LearningSession::from_response(raw, &self.clock)?;
        info!(session_id = %session.id(), challenges = session.challenges().len(), "returned session");
        Ok(session)
    }

    /// Answer every challenge with its first correct solution and submit the session.
    ///
    /// Sleeps for the configured delay after each challenge. A rejected
    /// submission is logged and returned, never raised.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Challenge` if a challenge has no solution to
    /// submit, and `SolverError::Submit` if the update request cannot be sent.
    pub async fn solve_session(
        &self,
        session: &mut LearningSession,
    ) -> Result<SubmitOutcome, SolverError> {
        let time_taken = self.delay_ms();

        for index in 0..session.challenges().len() {
            let answer = session.challenges_mut()[index].answer_with_first_solution(time_taken)?;
            info!(solution = %answer, delay = ?self.delay, "challenge solved, sleeping");
            tokio::time::sleep(self.delay).await;
            session.add_elapsed_ms(time_taken);
        }
        session.add_elapsed_ms(FINAL_REVIEW_MS);

        let outcome = self
            .api
            .update_session(session.id(), &session.to_submission())
            .await
            .map_err(SolverError::Submit)?;

        match &outcome {
            SubmitOutcome::Accepted => info!(session_id = %session.id(), "session accepted"),
            SubmitOutcome::Rejected { status, body } => {
                warn!(session_id = %session.id(), status, body = %body, "session submission rejected");
            }
        }
        Ok(outcome)
    }
}
