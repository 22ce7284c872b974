//! Seam between the solver and the remote learning service.

mod http;
mod memory;

use async_trait::async_trait;
use serde_json::Value;

use lingo_core::model::{SessionId, Skill, UserId};

use crate::error::ApiError;
use crate::sessions::SessionRequest;

pub use http::HttpLearningApi;
pub use memory::InMemoryLearningApi;

/// Result of sending a solved session back to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { status: u16, body: String },
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Remote operations the solver depends on.
#[async_trait]
pub trait LearningApi: Send + Sync {
    /// Look up the first account matching `username`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or decoding failures.
    async fn find_user_id(&self, username: &str) -> Result<Option<UserId>, ApiError>;

    /// Skills of the account's current course, grouped the way the service groups them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or decoding failures.
    async fn course_skills(&self, user_id: UserId) -> Result<Vec<Vec<Skill>>, ApiError>;

    /// Create a lesson session and return the raw session object.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or a non-success status.
    async fn create_session(&self, request: &SessionRequest) -> Result<Value, ApiError>;

    /// Replace a session with its solved state.
    ///
    /// A non-success status is reported as `SubmitOutcome::Rejected`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` only when the request could not be sent.
    async fn update_session(&self, id: &SessionId, body: &Value)
    -> Result<SubmitOutcome, ApiError>;
}
