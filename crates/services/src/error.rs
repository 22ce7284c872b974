//! Shared error types for the services crate.

use thiserror::Error;

use lingo_core::model::{ChallengeError, SessionShapeError, SkillId};

/// Errors emitted by `LearningApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("learning service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors emitted while building a `SolverConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("auth token is empty")]
    MissingToken,
    #[error("username is empty")]
    MissingUsername,
    #[error("invalid delay (expected non-negative seconds): {raw}")]
    InvalidDelay { raw: String },
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Errors emitted by the account, skill, session and orchestration services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolverError {
    #[error("no account found for username `{username}`")]
    AccountNotFound { username: String },
    #[error("account lookup failed: {0}")]
    AccountLookup(#[source] ApiError),
    #[error("listing skills failed: {0}")]
    Skills(#[source] ApiError),
    #[error("creating a session for skill {skill} failed: {source}")]
    SessionFetch {
        skill: SkillId,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    SessionShape(#[from] SessionShapeError),
    #[error(transparent)]
    Challenge(#[from] ChallengeError),
    #[error("submitting session failed: {0}")]
    Submit(#[source] ApiError),
    #[error("skill {skill} is still incomplete after {limit} sessions")]
    SessionLimit { skill: SkillId, limit: u32 },
}
