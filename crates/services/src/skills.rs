use tracing::debug;

use lingo_core::model::{Skill, UserId};

use crate::api::LearningApi;
use crate::error::SolverError;

/// Flatten the service's skill groups into one ordered list.
///
/// With `only_unsolved`, skills whose level and lesson counters both match
/// their totals are left out. Server order is preserved.
#[must_use]
pub fn flatten_skills(groups: Vec<Vec<Skill>>, only_unsolved: bool) -> Vec<Skill> {
    groups
        .into_iter()
        .flatten()
        .filter(|skill| !(only_unsolved && skill.is_complete()))
        .collect()
}

/// List the skills of the account's current course.
///
/// # Errors
///
/// Returns `SolverError::Skills` if the course cannot be fetched or decoded.
pub async fn list_skills(
    api: &dyn LearningApi,
    user_id: UserId,
    only_unsolved: bool,
) -> Result<Vec<Skill>, SolverError> {
    let groups = api
        .course_skills(user_id)
        .await
        .map_err(SolverError::Skills)?;
    let skills = flatten_skills(groups, only_unsolved);
    debug!(count = skills.len(), only_unsolved, "listed skills");
    Ok(skills)
}
