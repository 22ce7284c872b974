use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.duolingo.com/2017-06-30/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/92.0.4515.107 Safari/537.36";
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);
pub const DEFAULT_FROM_LANGUAGE: &str = "ru";
pub const DEFAULT_LEARNING_LANGUAGE: &str = "en";

/// Source and target language of the course being solved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguagePair {
    pub from: String,
    pub learning: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM_LANGUAGE.into(),
            learning: DEFAULT_LEARNING_LANGUAGE.into(),
        }
    }
}

/// Everything needed to talk to the learning service on behalf of one account.
#[derive(Clone)]
pub struct SolverConfig {
    pub token: String,
    pub username: String,
    pub delay: Duration,
    pub languages: LanguagePair,
    pub base_url: Url,
    pub user_agent: String,
    /// Upper bound on sessions requested per skill; `None` walks until the
    /// server totals are reached.
    pub session_limit: Option<u32>,
}

impl SolverConfig {
    /// Build a config with defaults for everything but the credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` or `ConfigError::MissingUsername`
    /// when either is blank.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into().trim().to_string();
        let username = username.into().trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        Ok(Self {
            token,
            username,
            delay: DEFAULT_DELAY,
            languages: LanguagePair::default(),
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            user_agent: DEFAULT_USER_AGENT.into(),
            session_limit: None,
        })
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: LanguagePair) -> Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_session_limit(mut self, limit: Option<u32>) -> Self {
        self.session_limit = limit;
        self
    }

    /// Point the client at a different API root.
    ///
    /// A trailing slash is added so relative endpoints join under the root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `raw` is not an absolute URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        self.base_url = Url::parse(&normalized)?;
        Ok(self)
    }
}

impl fmt::Debug for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverConfig")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .field("delay", &self.delay)
            .field("languages", &self.languages)
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("session_limit", &self.session_limit)
            .finish()
    }
}

/// Parse a delay given in (possibly fractional) seconds.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDelay` for negative, non-finite or unparsable input.
pub fn parse_delay(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDelay {
        raw: raw.to_string(),
    };
    let seconds: f64 = raw.trim().parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
}
