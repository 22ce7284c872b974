mod challenge;
mod ids;
mod session;
mod skill;

pub use ids::{SessionId, SkillId, UserId};

pub use challenge::{Challenge, ChallengeError};
pub use session::{LearningSession, SessionShapeError};
pub use skill::{LessonPosition, Skill, advance};
