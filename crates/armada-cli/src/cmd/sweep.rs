//! `armada sweep` -- demonstration counts across arm counts.

use std::path::PathBuf;

use anyhow::Result;
use armada_learning::{run_sweep, SweepSettings};
use clap::Args;

use super::DemoDirArg;
use crate::output;
use crate::session::{GlobalArgs, Session};

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    dir: DemoDirArg,
    /// Trials per arm count (default from config)
    #[arg(long)]
    runs: Option<usize>,
    /// JSON log, resumed if it exists (default from config)
    #[arg(long)]
    log: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(global: &GlobalArgs, args: SweepArgs) -> Result<()> {
    let mut session = Session::open(global, &args.dir.demo_dir)?;
    let mut settings = SweepSettings::from(&session.config);
    if let Some(runs) = args.runs {
        settings.runs_per_k = runs;
    }
    if let Some(log) = args.log {
        settings.log_file = log;
    }

    let summary = run_sweep(
        &session.oracle,
        &session.demos.config.dimensions,
        &session.demos.demonstrations,
        &session.demos.task_context(),
        &settings,
        &mut session.rng,
    )?;

    if args.json {
        output::print_json(&summary);
        return Ok(());
    }
    println!("{:>4} {:>6} {:>5} {:>8} {:>5}", "K", "runs", "min", "mean", "max");
    for k in &summary {
        println!(
            "{:>4} {:>6} {:>5} {:>8.2} {:>5}",
            k.arm_count, k.runs, k.min, k.mean, k.max
        );
    }
    Ok(())
}
