use serde::{Deserialize, Serialize};

use crate::model::SkillId;

/// Zero-based position of the next lesson to request within a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LessonPosition {
    pub level_index: u32,
    pub lesson_index: u32,
}

/// Advance a (lesson, level) pair by one completed lesson.
///
/// Lessons count up to `total_lessons` inclusive; one step past that wraps the
/// lesson counter to zero and moves to the next level.
#[must_use]
pub fn advance(lesson: u32, level: u32, total_lessons: u32) -> (u32, u32) {
    if lesson < total_lessons {
        (lesson + 1, level)
    } else {
        (0, level + 1)
    }
}

/// A course skill together with the account's progress through it.
///
/// Deserializes from the course entry shape the service returns
/// (`levels`, `lessons`, `finishedLevels`, `finishedLessons`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: String,
    #[serde(rename = "levels")]
    total_levels: u32,
    #[serde(rename = "lessons")]
    total_lessons: u32,
    #[serde(rename = "finishedLevels")]
    completed_levels: u32,
    #[serde(rename = "finishedLessons")]
    completed_lessons: u32,
}

impl Skill {
    #[must_use]
    pub fn new(
        id: SkillId,
        name: impl Into<String>,
        total_levels: u32,
        total_lessons: u32,
        completed_levels: u32,
        completed_lessons: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total_levels,
            total_lessons,
            completed_levels,
            completed_lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SkillId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn total_levels(&self) -> u32 {
        self.total_levels
    }

    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn completed_levels(&self) -> u32 {
        self.completed_levels
    }

    #[must_use]
    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }

    /// True once both completion counters match the skill totals.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_levels == self.total_levels && self.completed_lessons == self.total_lessons
    }

    /// Position of the next lesson to request.
    #[must_use]
    pub fn position(&self) -> LessonPosition {
        LessonPosition {
            level_index: self.completed_levels,
            lesson_index: self.completed_lessons,
        }
    }

    /// Record one finished lesson in the local progress mirror.
    pub fn record_lesson(&mut self) {
        let (lesson, level) = advance(
            self.completed_lessons,
            self.completed_levels,
            self.total_lessons,
        );
        self.completed_lessons = lesson;
        self.completed_levels = level;
    }
}
