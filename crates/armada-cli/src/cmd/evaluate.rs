//! `armada evaluate` -- one PAC round over every loaded demonstration.

use anyhow::Result;
use armada_bandit::{run_naive_pac, PacReport, PacSettings};
use clap::Args;
use serde_json::json;

use super::DemoDirArg;
use crate::output;
use crate::session::{GlobalArgs, Session};

#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    dir: DemoDirArg,
}

pub fn run(global: &GlobalArgs, args: EvaluateArgs) -> Result<()> {
    let mut session = Session::open(global, &args.dir.demo_dir)?;
    let settings = PacSettings::from(&session.config);
    let mut arms = session.demos.arms();
    let report = run_naive_pac(
        &session.oracle,
        &mut arms,
        &session.demos.demonstrations,
        &session.demos.task_context(),
        &settings,
        &mut session.rng,
    )?;
    output::print_json(&report_json(&report));
    Ok(())
}

pub fn report_json(report: &PacReport) -> serde_json::Value {
    let arms: Vec<_> = report
        .samples
        .iter()
        .map(|(id, metadata)| {
            json!({
                "arm_id": id,
                "successes": metadata.success.len(),
                "failures": metadata.failure.len(),
                "failure_rate": metadata.failure_rate(),
            })
        })
        .collect();
    json!({
        "worst_arm_id": report.worst_arm_id,
        "worst_failure_rate": report.worst_failure_rate,
        "samples_per_arm": report.samples_per_arm,
        "next_demonstration": report.next_demonstration,
        "arms": arms,
    })
}
