//! Command-line surface of the autopilot.

use std::time::Duration;

use clap::{Parser, Subcommand};
use services::config::{DEFAULT_FROM_LANGUAGE, DEFAULT_LEARNING_LANGUAGE};
use services::{ConfigError, LanguagePair, SolverConfig, parse_delay};

/// Completes language-course lessons on behalf of an account.
#[derive(Parser, Debug)]
#[command(name = "lingo-autopilot", version, about, long_about = None)]
pub struct Cli {
    /// Bearer token of the account
    #[arg(long, env = "LINGO_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Username whose account is driven
    #[arg(long, env = "LINGO_USERNAME", global = true)]
    pub username: Option<String>,

    /// Seconds spent on each challenge
    #[arg(long, env = "LINGO_DELAY_SECS", value_parser = parse_delay, default_value = "3", global = true)]
    pub delay: Duration,

    /// Language the course is taught from
    #[arg(long = "from", env = "LINGO_FROM_LANGUAGE", default_value = DEFAULT_FROM_LANGUAGE, global = true)]
    pub from_language: String,

    /// Language being learned
    #[arg(long = "learning", env = "LINGO_LEARNING_LANGUAGE", default_value = DEFAULT_LEARNING_LANGUAGE, global = true)]
    pub learning_language: String,

    /// API root of the learning service
    #[arg(long, env = "LINGO_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Give up on a skill after this many sessions
    #[arg(long, global = true)]
    pub max_sessions: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Solve the first unsolved skill
    First,
    /// Solve every unsolved skill; Ctrl-C stops after logging progress
    All,
    /// List course skills with their progress
    Skills {
        /// Include skills that are already complete
        #[arg(long)]
        all: bool,
    },
}

impl Cli {
    /// Merge flags and environment into a validated config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for missing credentials or a bad base url.
    pub fn config(&self) -> Result<SolverConfig, ConfigError> {
        let mut config = SolverConfig::new(
            self.token.clone().unwrap_or_default(),
            self.username.clone().unwrap_or_default(),
        )?
        .with_delay(self.delay)
        .with_languages(LanguagePair {
            from: self.from_language.clone(),
            learning: self.learning_language.clone(),
        })
        .with_session_limit(self.max_sessions);

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_into_config() {
        let cli = Cli::try_parse_from([
            "lingo-autopilot",
            "--token",
            "tok",
            "--username",
            "learner",
            "--delay",
            "0.5",
            "--from",
            "de",
            "--learning",
            "fr",
            "--base-url",
            "http://localhost:1234",
            "--max-sessions",
            "40",
            "all",
        ])
        .unwrap();

        assert_eq!(cli.command, Commands::All);
        let config = cli.config().unwrap();
        assert_eq!(config.username, "learner");
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.languages.from, "de");
        assert_eq!(config.languages.learning, "fr");
        assert_eq!(config.base_url.as_str(), "http://localhost:1234/");
        assert_eq!(config.session_limit, Some(40));
    }

    #[test]
    fn skills_subcommand_takes_all_flag() {
        let cli = Cli::try_parse_from([
            "lingo-autopilot",
            "skills",
            "--all",
            "--token",
            "t",
            "--username",
            "u",
        ])
        .unwrap();
        assert_eq!(cli.command, Commands::Skills { all: true });
    }

    #[test]
    fn rejects_negative_delay() {
        let result = Cli::try_parse_from(["lingo-autopilot", "--delay=-2", "first"]);
        assert!(result.is_err());
    }
}
