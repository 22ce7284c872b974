use serde::Serialize;

use lingo_core::model::{LessonPosition, SkillId};

use crate::config::LanguagePair;

/// Challenge types requested for every session.
///
/// Listening, speaking and judging exercises are left out so every returned
/// challenge carries a `correctSolutions` list.
pub const CHALLENGE_TYPES: &[&str] = &[
    "characterIntro",
    "characterMatch",
    "characterSelect",
    "characterTrace",
    "definition",
    "dialogue",
    "freeResponse",
    "gapFill",
    "name",
    "readComprehension",
    "tapCloze",
    "tapClozeTable",
    "tapComplete",
    "tapCompleteTable",
    "tapDescribe",
    "translate",
    "typeCloze",
    "typeClozeTable",
    "typeCompleteTable",
];

/// Body of a session-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    challenge_types: &'static [&'static str],
    from_language: String,
    juicy: bool,
    learning_language: String,
    smart_tips_version: u8,
    level_index: u32,
    level_session_index: u32,
    show_pre_lesson_tip_splash: bool,
    skill_id: SkillId,
    #[serde(rename = "type")]
    kind: &'static str,
    speak_ineligible_reasons: &'static str,
}

impl SessionRequest {
    #[must_use]
    pub fn lesson(skill_id: SkillId, position: LessonPosition, languages: &LanguagePair) -> Self {
        Self {
            challenge_types: CHALLENGE_TYPES,
            from_language: languages.from.clone(),
            juicy: true,
            learning_language: languages.learning.clone(),
            smart_tips_version: 2,
            level_index: position.level_index,
            level_session_index: position.lesson_index,
            show_pre_lesson_tip_splash: false,
            skill_id,
            kind: "LESSON",
            speak_ineligible_reasons: "permission_disabled",
        }
    }

    #[must_use]
    pub fn skill_id(&self) -> &SkillId {
        &self.skill_id
    }

    #[must_use]
    pub fn position(&self) -> LessonPosition {
        LessonPosition {
            level_index: self.level_index,
            lesson_index: self.level_session_index,
        }
    }
}
