//! `armada collect` -- find k solvable task instances per arm and write
//! their plans.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use armada_bandit::{collect_successful_plans, SearchSettings, SuccessfulPlan};
use armada_core::models::by_descending_score;
use clap::Args;

use super::DemoDirArg;
use crate::output;
use crate::session::{GlobalArgs, Session};

const PLAN_HEADER: [&str; 7] = [
    "left_s0", "left_s1", "left_e0", "left_e1", "left_w0", "left_w1", "left_w2",
];

#[derive(Args)]
pub struct CollectArgs {
    #[command(flatten)]
    dir: DemoDirArg,
    /// Solved task instances per arm (default from config)
    #[arg(short)]
    k: Option<usize>,
    /// Output directory for plans and object poses
    #[arg(short, long, default_value = "plans")]
    output: PathBuf,
}

pub fn run(global: &GlobalArgs, args: CollectArgs) -> Result<()> {
    let mut session = Session::open(global, &args.dir.demo_dir)?;
    let mut settings = SearchSettings::from(&session.config);
    if let Some(k) = args.k {
        settings.successes_per_arm = k;
    }
    let demos: Vec<_> = by_descending_score(&session.demos.demonstrations)
        .into_iter()
        .cloned()
        .collect();

    let plans = collect_successful_plans(
        &session.oracle,
        &session.demos.arms(),
        &demos,
        &session.demos.task_context(),
        &settings,
        session.oracle.cancellation_token(),
        &mut session.rng,
    )?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut written = 0;
    for (arm_id, found) in &plans {
        for (i, plan) in found.iter().enumerate() {
            let name = format!("{}_in_region_{arm_id}", i + 1);
            write_plan(&args.output.join(format!("plan_{name}.csv")), plan)?;
            write_pose(&args.output.join(format!("object_pose_{name}.txt")), plan)?;
            written += 1;
        }
    }
    println!("Wrote {written} plans to {}", args.output.display());
    output::print_kv("Arms:", &plans.len().to_string());
    output::print_kv("Per arm:", &settings.successes_per_arm.to_string());
    Ok(())
}

fn write_plan(path: &Path, plan: &SuccessfulPlan) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(PLAN_HEADER)?;
    for waypoint in &plan.plan {
        writer.write_record(waypoint.iter().map(f64::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// One `x,y,heading` line per object.
fn write_pose(path: &Path, plan: &SuccessfulPlan) -> Result<()> {
    let lines: Vec<String> = plan
        .task_instance
        .poses
        .iter()
        .map(|p| format!("{},{},{}", p.x, p.y, p.heading))
        .collect();
    fs::write(path, lines.join("\n") + "\n").with_context(|| format!("writing {}", path.display()))
}
