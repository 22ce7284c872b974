use std::sync::Arc;
use std::time::Duration;

use lingo_core::model::{Skill, SkillId, UserId};
use lingo_core::time::fixed_clock;
use serde_json::json;
use services::{CourseSolver, InMemoryLearningApi, RunOutcome, SolverConfig, SolverError};

fn skill(id: &str, levels: u32, lessons: u32, done_levels: u32, done_lessons: u32) -> Skill {
    Skill::new(
        SkillId::new(id),
        format!("skill {id}"),
        levels,
        lessons,
        done_levels,
        done_lessons,
    )
}

fn course() -> InMemoryLearningApi {
    InMemoryLearningApi::new()
        .with_user("learner", UserId::new(1))
        .with_challenges(vec![
            json!({"correctSolutions": ["one"]}),
            json!({"correctSolutions": ["two", "deux"]}),
        ])
        .with_skill_group(vec![skill("done", 1, 1, 1, 1), skill("a", 1, 0, 0, 0)])
        .with_skill_group(vec![skill("b", 1, 0, 0, 0), skill("c", 1, 0, 0, 0)])
}

fn config() -> SolverConfig {
    SolverConfig::new("token", "learner")
        .unwrap()
        .with_delay(Duration::from_secs(3))
}

async fn connect(api: &InMemoryLearningApi) -> CourseSolver {
    CourseSolver::connect(Arc::new(api.clone()), &config(), fixed_clock())
        .await
        .expect("connect")
}

fn requested_skills(api: &InMemoryLearningApi) -> Vec<String> {
    api.created_sessions()
        .iter()
        .map(|r| r.skill_id().to_string())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn solve_all_walks_every_unsolved_skill() {
    let api = course();
    let mut solver = connect(&api).await;

    let outcome = solver.solve_all_until(std::future::pending()).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(solver.solved_skills(), ["skill a", "skill b", "skill c"]);
    assert_eq!(requested_skills(&api), ["a", "b", "c"]);

    for (_, body) in api.submissions() {
        assert_eq!(body["challenges"][0]["guess"], json!("one"));
        assert_eq!(body["challenges"][1]["guess"], json!("two"));
        assert_eq!(
            body["endTime"].as_i64().unwrap() - body["startTime"].as_i64().unwrap(),
            8000
        );
    }
}

#[tokio::test(start_paused = true)]
async fn solve_all_stops_at_first_failing_skill() {
    let api = course().failing_sessions_for(SkillId::new("b"));
    let mut solver = connect(&api).await;

    let err = solver
        .solve_all_until(std::future::pending())
        .await
        .unwrap_err();

    assert!(matches!(err, SolverError::SessionFetch { .. }));
    assert_eq!(solver.solved_skills(), ["skill a"]);
    assert_eq!(requested_skills(&api), ["a"]);
}

#[tokio::test(start_paused = true)]
async fn solve_all_honours_stop_request() {
    let api = course();
    let mut solver = connect(&api).await;

    // Skill `a` needs one session of two 3s challenges; stop lands inside skill `b`.
    let outcome = solver
        .solve_all_until(tokio::time::sleep(Duration::from_secs(10)))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(solver.solved_skills(), ["skill a"]);
    assert_eq!(api.submissions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_submissions_do_not_stop_the_run() {
    let api = course().rejecting_submissions(500);
    let mut solver = connect(&api).await;

    let outcome = solver.solve_all_until(std::future::pending()).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(solver.solved_skills().len(), 3);
    assert_eq!(api.submissions().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn solve_first_only_touches_first_unsolved_skill() {
    let api = course();
    let mut solver = connect(&api).await;

    let solved = solver.solve_first().await.unwrap();

    assert_eq!(solved.as_deref(), Some("skill a"));
    assert_eq!(requested_skills(&api), ["a"]);
}

#[tokio::test(start_paused = true)]
async fn solve_first_with_nothing_left_is_a_no_op() {
    let api = InMemoryLearningApi::new()
        .with_user("learner", UserId::new(1))
        .with_skill_group(vec![skill("done", 2, 2, 2, 2)]);
    let mut solver = connect(&api).await;

    assert_eq!(solver.solve_first().await.unwrap(), None);
    assert!(api.created_sessions().is_empty());
}

#[tokio::test]
async fn connect_fails_for_unknown_account() {
    let api = InMemoryLearningApi::new();

    let result = CourseSolver::connect(Arc::new(api), &config(), fixed_clock()).await;

    assert!(matches!(result, Err(SolverError::AccountNotFound { .. })));
}

#[tokio::test]
async fn skills_listing_can_include_solved() {
    let api = course();
    let solver = connect(&api).await;

    assert_eq!(solver.skills(false).await.unwrap().len(), 4);
    assert_eq!(solver.skills(true).await.unwrap().len(), 3);
}
