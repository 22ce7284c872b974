use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const CORRECT_SOLUTIONS: &str = "correctSolutions";
const GRADER: &str = "grader";
const CORRECT: &str = "correct";
const CLOSEST_SOLUTION: &str = "closestSolution";
const GUESS: &str = "guess";
const TIME_TAKEN: &str = "timeTaken";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("challenge has no `correctSolutions` list")]
    MissingSolutions,

    #[error("challenge `correctSolutions` list is empty")]
    EmptySolutions,
}

/// A single question inside a learning session.
///
/// The service varies the shape by challenge type, so the record is kept as an
/// open key/value map. Only the keys the solver touches are interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Challenge(Map<String, Value>);

impl Challenge {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The first acceptable answer supplied by the service.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::MissingSolutions` if the list is absent or not an
    /// array, and `ChallengeError::EmptySolutions` if it has no entries.
    pub fn first_correct_solution(&self) -> Result<&Value, ChallengeError> {
        let solutions = self
            .0
            .get(CORRECT_SOLUTIONS)
            .and_then(Value::as_array)
            .ok_or(ChallengeError::MissingSolutions)?;
        solutions.first().ok_or(ChallengeError::EmptySolutions)
    }

    /// Answer the challenge with its first correct solution.
    ///
    /// Drops the grader, marks the challenge correct, fills `closestSolution` and
    /// `guess`, and records `time_taken_ms`. Returns the submitted answer.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` if the challenge carries no usable solution; the
    /// record is left untouched in that case.
    pub fn answer_with_first_solution(
        &mut self,
        time_taken_ms: u64,
    ) -> Result<Value, ChallengeError> {
        let answer = self.first_correct_solution()?.clone();

        self.0.remove(GRADER);
        self.0.insert(CORRECT.into(), Value::Bool(true));
        self.0.insert(CLOSEST_SOLUTION.into(), answer.clone());
        self.0.insert(GUESS.into(), answer.clone());
        self.0.insert(TIME_TAKEN.into(), Value::from(time_taken_ms));

        Ok(answer)
    }

    #[must_use]
    pub fn guess(&self) -> Option<&Value> {
        self.0.get(GUESS)
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.0.get(CORRECT).and_then(Value::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn time_taken_ms(&self) -> Option<u64> {
        self.0.get(TIME_TAKEN).and_then(Value::as_u64)
    }

    #[must_use]
    pub fn has_grader(&self) -> bool {
        self.0.contains_key(GRADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn challenge(raw: Value) -> Challenge {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn answers_with_first_solution_only() {
        let mut c = challenge(json!({
            "type": "translate",
            "correctSolutions": ["y", "z"],
            "grader": {"vertices": []}
        }));

        let answer = c.answer_with_first_solution(3000).unwrap();

        assert_eq!(answer, json!("y"));
        assert_eq!(c.guess(), Some(&json!("y")));
        assert_eq!(c.get("closestSolution"), Some(&json!("y")));
        assert!(c.is_correct());
        assert!(!c.has_grader());
        assert_eq!(c.time_taken_ms(), Some(3000));
        assert_eq!(c.get("type"), Some(&json!("translate")));
    }

    #[test]
    fn missing_or_empty_solutions_are_rejected() {
        let mut missing = challenge(json!({"type": "name", "grader": {}}));
        assert_eq!(
            missing.answer_with_first_solution(1000).unwrap_err(),
            ChallengeError::MissingSolutions
        );
        assert!(missing.has_grader());

        let mut empty = challenge(json!({"correctSolutions": []}));
        assert_eq!(
            empty.answer_with_first_solution(1000).unwrap_err(),
            ChallengeError::EmptySolutions
        );
    }
}
