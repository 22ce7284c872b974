use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Challenge, SessionId};
use crate::time::Clock;

/// Keys owned by the client; anything the server sends under these names is replaced.
const LOCAL_KEYS: [&str; 6] = [
    "startTime",
    "endTime",
    "failed",
    "heartsLeft",
    "disable_bonus_points",
    "max_in_lesson_streak",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionShapeError {
    #[error("session response is not a JSON object")]
    NotAnObject,

    #[error("session response has no string `id`")]
    MissingId,

    #[error("session challenges are malformed: {0}")]
    InvalidChallenges(String),
}

/// One lesson's worth of challenges, as created by the service.
///
/// Every field the service returned is kept and echoed back on submission;
/// the timing and streak fields are owned locally.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningSession {
    id: SessionId,
    challenges: Vec<Challenge>,
    fields: Map<String, Value>,
    start_time: i64,
    end_time: i64,
    max_in_lesson_streak: usize,
}

impl LearningSession {
    /// Build a session from a creation response.
    ///
    /// `startTime` is captured from `clock` now; `endTime` starts equal to it.
    ///
    /// # Errors
    ///
    /// Returns `SessionShapeError` if the response is not an object, lacks an
    /// `id`, or has a `challenges` entry that is not a list of objects.
    pub fn from_response(raw: Value, clock: &Clock) -> Result<Self, SessionShapeError> {
        let Value::Object(mut fields) = raw else {
            return Err(SessionShapeError::NotAnObject);
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) => SessionId::new(id),
            _ => return Err(SessionShapeError::MissingId),
        };

        let challenges: Vec<Challenge> = match fields.remove("challenges") {
            Some(list) => serde_json::from_value(list)
                .map_err(|e| SessionShapeError::InvalidChallenges(e.to_string()))?,
            None => {
                return Err(SessionShapeError::InvalidChallenges(
                    "missing `challenges`".into(),
                ));
            }
        };

        for key in LOCAL_KEYS {
            fields.remove(key);
        }

        let start_time = clock.epoch_seconds();
        let max_in_lesson_streak = challenges.len();

        Ok(Self {
            id,
            challenges,
            fields,
            start_time,
            end_time: start_time,
            max_in_lesson_streak,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    #[must_use]
    pub fn challenges_mut(&mut self) -> &mut [Challenge] {
        &mut self.challenges
    }

    #[must_use]
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    #[must_use]
    pub fn max_in_lesson_streak(&self) -> usize {
        self.max_in_lesson_streak
    }

    /// Server-supplied field that is echoed back unchanged.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Push the end-time accumulator forward.
    pub fn add_elapsed_ms(&mut self, ms: u64) {
        let ms = i64::try_from(ms).unwrap_or(i64::MAX);
        self.end_time = self.end_time.saturating_add(ms);
    }

    /// Full session body for the update request.
    #[must_use]
    pub fn to_submission(&self) -> Value {
        let mut body = self.fields.clone();
        body.insert("id".into(), Value::String(self.id.as_str().to_owned()));
        body.insert(
            "challenges".into(),
            Value::Array(
                self.challenges
                    .iter()
                    .map(|c| Value::Object(c.fields().clone()))
                    .collect(),
            ),
        );
        body.insert("disable_bonus_points".into(), Value::Bool(false));
        body.insert("startTime".into(), Value::from(self.start_time));
        body.insert("endTime".into(), Value::from(self.end_time));
        body.insert("failed".into(), Value::Bool(false));
        body.insert("heartsLeft".into(), Value::from(0));
        body.insert(
            "max_in_lesson_streak".into(),
            Value::from(self.max_in_lesson_streak),
        );
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{FIXED_TEST_TIMESTAMP, fixed_clock};
    use serde_json::json;

    fn response() -> Value {
        json!({
            "id": "sess-1",
            "type": "LESSON",
            "skillId": "skill-9",
            "levelIndex": 0,
            "challenges": [
                {"correctSolutions": ["x"]},
                {"correctSolutions": ["y", "z"]}
            ],
            "startTime": 5,
            "failed": true
        })
    }

    #[test]
    fn parses_response_and_captures_start_time() {
        let session = LearningSession::from_response(response(), &fixed_clock()).unwrap();

        assert_eq!(session.id().as_str(), "sess-1");
        assert_eq!(session.challenges().len(), 2);
        assert_eq!(session.max_in_lesson_streak(), 2);
        assert_eq!(session.start_time(), FIXED_TEST_TIMESTAMP);
        assert_eq!(session.end_time(), FIXED_TEST_TIMESTAMP);
        assert_eq!(session.field("skillId"), Some(&json!("skill-9")));
        assert_eq!(session.field("startTime"), None);
    }

    #[test]
    fn submission_echoes_server_fields_and_local_state() {
        let mut session = LearningSession::from_response(response(), &fixed_clock()).unwrap();
        session.add_elapsed_ms(2000);

        let body = session.to_submission();

        assert_eq!(body["id"], json!("sess-1"));
        assert_eq!(body["type"], json!("LESSON"));
        assert_eq!(body["levelIndex"], json!(0));
        assert_eq!(body["failed"], json!(false));
        assert_eq!(body["heartsLeft"], json!(0));
        assert_eq!(body["disable_bonus_points"], json!(false));
        assert_eq!(body["max_in_lesson_streak"], json!(2));
        assert_eq!(body["startTime"], json!(FIXED_TEST_TIMESTAMP));
        assert_eq!(body["endTime"], json!(FIXED_TEST_TIMESTAMP + 2000));
        assert_eq!(body["challenges"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn rejects_malformed_responses() {
        let clock = fixed_clock();
        assert_eq!(
            LearningSession::from_response(json!([1, 2]), &clock).unwrap_err(),
            SessionShapeError::NotAnObject
        );
        assert_eq!(
            LearningSession::from_response(json!({"challenges": []}), &clock).unwrap_err(),
            SessionShapeError::MissingId
        );
        assert!(matches!(
            LearningSession::from_response(json!({"id": "a"}), &clock),
            Err(SessionShapeError::InvalidChallenges(_))
        ));
        assert!(matches!(
            LearningSession::from_response(json!({"id": "a", "challenges": [1]}), &clock),
            Err(SessionShapeError::InvalidChallenges(_))
        ));
    }
}
