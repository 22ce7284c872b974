mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lingo_core::Clock;
use services::{CourseSolver, HttpLearningApi, RunOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config().context("invalid configuration")?;
    let api = Arc::new(HttpLearningApi::new(&config).context("building http client")?);
    let mut solver = CourseSolver::connect(api, &config, Clock::default()).await?;

    match cli.command {
        Commands::First => {
            if let Some(name) = solver.solve_first().await? {
                info!(skill = %name, "done");
            }
        }
        Commands::All => match solver.solve_all().await? {
            RunOutcome::Completed => {}
            // Stop requested: progress is already logged, leave right away.
            RunOutcome::Interrupted => std::process::exit(0),
        },
        Commands::Skills { all } => {
            for skill in solver.skills(!all).await? {
                println!(
                    "{:<32} level {}/{}  lesson {}/{}  [{}]",
                    skill.name(),
                    skill.completed_levels(),
                    skill.total_levels(),
                    skill.completed_lessons(),
                    skill.total_lessons(),
                    skill.id(),
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
