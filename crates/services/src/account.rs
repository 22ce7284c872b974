use std::time::Duration;

use tracing::info;

use lingo_core::model::UserId;

use crate::api::LearningApi;
use crate::error::SolverError;

/// The account being driven: who it is and how fast to go.
///
/// Resolved once at startup and never changed afterwards. The auth token
/// itself stays with the `LearningApi` implementation that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    username: String,
    user_id: UserId,
    delay: Duration,
}

impl AccountContext {
    /// Resolve `username` to the first matching account.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::AccountNotFound` when no account matches and
    /// `SolverError::AccountLookup` when the lookup request fails.
    pub async fn resolve(
        api: &dyn LearningApi,
        username: &str,
        delay: Duration,
    ) -> Result<Self, SolverError> {
        let user_id = api
            .find_user_id(username)
            .await
            .map_err(SolverError::AccountLookup)?
            .ok_or_else(|| SolverError::AccountNotFound {
                username: username.to_string(),
            })?;

        info!(username, %user_id, "resolved account");

        Ok(Self {
            username: username.to_string(),
            user_id,
            delay,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
