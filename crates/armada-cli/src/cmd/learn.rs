//! `armada learn` -- run the active-learning loop.

use anyhow::Result;
use armada_learning::{run_active_learning, LearningSettings, LoopOutcome, RoundState};
use clap::Args;
use serde_json::json;

use super::DemoDirArg;
use crate::output;
use crate::session::{GlobalArgs, Session};

#[derive(Args)]
pub struct LearnArgs {
    #[command(flatten)]
    dir: DemoDirArg,
    /// Print each round's report as a JSON line on stderr
    #[arg(long)]
    rounds: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(global: &GlobalArgs, args: LearnArgs) -> Result<()> {
    let mut session = Session::open(global, &args.dir.demo_dir)?;
    let settings = LearningSettings::from(&session.config);
    let show_rounds = args.rounds;
    let mut observer = |state: &RoundState<'_>| {
        if show_rounds {
            let line = json!({
                "round": state.round,
                "acquired": state.acquired.trajectory_file,
                "report": super::evaluate::report_json(state.report),
            });
            eprintln!("{line}");
        }
    };

    let outcome = run_active_learning(
        &session.oracle,
        session.demos.arms(),
        &session.demos.task_context(),
        &settings,
        &mut observer,
        &mut session.rng,
    )?;

    let files: Vec<&str> = outcome
        .demonstrations()
        .iter()
        .map(|d| d.trajectory_file.as_str())
        .collect();
    if args.json {
        output::print_json(&json!({
            "outcome": if outcome.is_success() { "success" } else { "exhausted" },
            "demonstrations": files,
        }));
        return Ok(());
    }
    match outcome {
        LoopOutcome::Success(_) => {
            println!("Acquired {} demonstrations:", files.len());
            for (i, file) in files.iter().enumerate() {
                output::print_kv(&format!("#{}", i + 1), file);
            }
        }
        LoopOutcome::Exhausted => println!("exhausted"),
    }
    Ok(())
}
