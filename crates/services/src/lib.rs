#![forbid(unsafe_code)]

pub mod account;
pub mod api;
pub mod config;
pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod sessions;
pub mod skills;

pub use lingo_core::Clock;

pub use account::AccountContext;
pub use api::{HttpLearningApi, InMemoryLearningApi, LearningApi, SubmitOutcome};
pub use config::{LanguagePair, SolverConfig, parse_delay};
pub use driver::{SkillDriver, SkillReport};
pub use error::{ApiError, ConfigError, SolverError};
pub use orchestrator::{CourseSolver, RunOutcome};
pub use sessions::{SessionRequest, SessionService};
pub use skills::{flatten_skills, list_skills};
