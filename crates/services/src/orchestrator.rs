use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, warn};

use lingo_core::Clock;
use lingo_core::model::Skill;

use crate::account::AccountContext;
use crate::api::LearningApi;
use crate::config::SolverConfig;
use crate::driver::SkillDriver;
use crate::error::SolverError;
use crate::sessions::SessionService;
use crate::skills::list_skills;

/// How a `solve_all` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted,
}

/// Drives the skill driver across the account's unsolved skills.
pub struct CourseSolver {
    api: Arc<dyn LearningApi>,
    account: AccountContext,
    driver: SkillDriver,
    solved_skills: Vec<String>,
}

impl CourseSolver {
    /// Resolve the configured account and assemble the services.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::AccountNotFound` or `SolverError::AccountLookup`
    /// if the account cannot be resolved.
    pub async fn connect(
        api: Arc<dyn LearningApi>,
        config: &SolverConfig,
        clock: Clock,
    ) -> Result<Self, SolverError> {
        let account = AccountContext::resolve(api.as_ref(), &config.username, config.delay).await?;
        let sessions = SessionService::new(
            Arc::clone(&api),
            config.languages.clone(),
            account.delay(),
        )
        .with_clock(clock);
        let driver = SkillDriver::new(sessions).with_session_limit(config.session_limit);

        Ok(Self {
            api,
            account,
            driver,
            solved_skills: Vec::new(),
        })
    }

    /// Names of skills completed by this solver, in completion order.
    #[must_use]
    pub fn solved_skills(&self) -> &[String] {
        &self.solved_skills
    }

    /// List the account's skills.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::Skills` if the course cannot be fetched.
    pub async fn skills(&self, only_unsolved: bool) -> Result<Vec<Skill>, SolverError> {
        list_skills(self.api.as_ref(), self.account.user_id(), only_unsolved).await
    }

    /// Solve the first unsolved skill, if any. Returns its name.
    ///
    /// # Errors
    ///
    /// Propagates any error from listing skills or driving the skill.
    pub async fn solve_first(&mut self) -> Result<Option<String>, SolverError> {
        let Some(mut skill) = self.skills(true).await?.into_iter().next() else {
            info!("no unsolved skills left");
            return Ok(None);
        };

        self.driver.solve_skill(&mut skill).await?;
        let name = skill.name().to_string();
        self.solved_skills.push(name.clone());
        Ok(Some(name))
    }

    /// Solve every unsolved skill, stopping cleanly on Ctrl-C.
    ///
    /// # Errors
    ///
    /// See [`CourseSolver::solve_all_until`].
    pub async fn solve_all(&mut self) -> Result<RunOutcome, SolverError> {
        self.solve_all_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(%err, "cannot listen for Ctrl-C; run can only end by finishing");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Solve every unsolved skill until `stop` resolves.
    ///
    /// The first failing skill aborts the run: the skills solved so far are
    /// logged and the error is returned. When `stop` fires, the skills solved so
    /// far are logged and `RunOutcome::Interrupted` is returned; the skill in
    /// progress is abandoned where it stands.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while listing or solving skills.
    pub async fn solve_all_until<F>(&mut self, stop: F) -> Result<RunOutcome, SolverError>
    where
        F: Future<Output = ()>,
    {
        let mut stop = std::pin::pin!(stop);
        let skills = self.skills(true).await?;

        for mut skill in skills {
            let result = tokio::select! {
                () = &mut stop => {
                    info!(solved = ?self.solved_skills, "stopped");
                    return Ok(RunOutcome::Interrupted);
                }
                result = self.driver.solve_skill(&mut skill) => result,
            };

            match result {
                Ok(_) => self.solved_skills.push(skill.name().to_string()),
                Err(err) => {
                    error!(solved = ?self.solved_skills, %err, "aborting run");
                    return Err(err);
                }
            }
        }

        info!(solved = ?self.solved_skills, "all skills solved");
        Ok(RunOutcome::Completed)
    }
}
