//! Naive PAC worst-arm identification.
//!
//! Sampling every arm `⌊ln(2K/δ) / 2ε²⌋` times identifies an arm whose
//! failure rate is within ε of the worst arm's with probability at least
//! 1 − δ.

use std::collections::BTreeMap;

use armada_core::errors::BanditError;
use armada_core::models::{Arm, ArmId, ArmSampleMetadata, Demonstration, TaskInstance};
use armada_core::tracing::{events, fields};
use armada_core::traits::PlanningOracle;
use rand::Rng;
use rayon::prelude::*;
use tracing::field::Empty;
use tracing::{debug, info_span};

use crate::evaluator::{commit, prepare, probe, request_order, Prepared};
use crate::settings::{PacSettings, TaskContext};

/// Outcome of one PAC round.
#[derive(Debug, Clone, PartialEq)]
pub struct PacReport {
    pub worst_arm_id: ArmId,
    pub worst_failure_rate: f64,
    /// A hardest failure of the worst arm; `None` if that arm never failed.
    pub next_demonstration: Option<TaskInstance>,
    pub samples: BTreeMap<ArmId, ArmSampleMetadata>,
    pub samples_per_arm: usize,
}

/// Samples required per arm: `⌊ln(2·arm_count/δ) / (2ε²)⌋`.
///
/// ε and δ are not validated here; configuration validation keeps them
/// in (0, 1).
pub fn sample_count(arm_count: usize, epsilon: f64, delta: f64) -> usize {
    let n = (2.0 * arm_count as f64 / delta).ln() / (2.0 * epsilon * epsilon);
    if n.is_finite() && n > 0.0 {
        n.floor() as usize
    } else {
        0
    }
}

/// Run one PAC round over `arms` with the accumulated `demos`.
///
/// Random draws happen in a fixed order: every arm's samples in slice
/// order, then the worst-arm tie-break, then the candidate tie-break. With
/// `parallel_arms` only the oracle calls run concurrently, so a seeded run
/// gives the same report either way.
pub fn run_naive_pac<O, R>(
    oracle: &O,
    arms: &mut [Arm],
    demos: &[Demonstration],
    task: &TaskContext<'_>,
    settings: &PacSettings,
    rng: &mut R,
) -> Result<PacReport, BanditError>
where
    O: PlanningOracle + ?Sized,
    R: Rng + ?Sized,
{
    if arms.is_empty() {
        return Err(BanditError::NoArms);
    }
    let samples_per_arm = sample_count(arms.len(), settings.epsilon, settings.delta);
    let span = info_span!(
        "armada.pac",
        arms = arms.len(),
        samples_per_arm = samples_per_arm,
        demonstrations = demos.len(),
        arm_id = Empty,
        failure_rate = Empty,
    );
    let _guard = span.enter();

    let reuse = settings.reuse_samples;
    let ordered = request_order(demos, reuse)?;

    let prepared = arms
        .iter()
        .map(|arm| prepare(arm, task, samples_per_arm, reuse, rng))
        .collect::<Result<Vec<_>, _>>()?;

    let probe_one = |p: &Prepared| match p {
        Prepared::Probe { arm_id, instances } => {
            let _arm = info_span!("armada.arm", arm_id = *arm_id).entered();
            probe(oracle, instances, &ordered, task, settings.object_z).map(Some)
        }
        Prepared::Skip { .. } => Ok(None),
    };
    let verdicts = if settings.parallel_arms {
        prepared.par_iter().map(probe_one).collect::<Result<Vec<_>, _>>()?
    } else {
        prepared.iter().map(probe_one).collect::<Result<Vec<_>, _>>()?
    };

    let mut samples = BTreeMap::new();
    for ((arm, prepared), verdict) in arms.iter_mut().zip(prepared).zip(verdicts) {
        let metadata = match (prepared, verdict) {
            (Prepared::Probe { instances, .. }, Some(verdict)) => {
                commit(arm, instances, verdict, reuse)
            }
            _ => {
                debug!(arm_id = arm.id, "no stored failures left, reusing stored samples");
                arm.samples.clone().unwrap_or_default()
            }
        };
        events::arm_evaluated(arm.id, metadata.failure.len(), metadata.total());
        samples.insert(arm.id, metadata);
    }

    let mut rates = Vec::with_capacity(samples.len());
    for (arm_id, metadata) in &samples {
        let rate = metadata
            .failure_rate()
            .ok_or(BanditError::DegenerateArm { arm_id: *arm_id })?;
        rates.push((*arm_id, rate));
    }

    let worst_failure_rate = rates
        .iter()
        .map(|(_, rate)| *rate)
        .fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<ArmId> = rates
        .iter()
        .filter(|(_, rate)| *rate == worst_failure_rate)
        .map(|(id, _)| *id)
        .collect();
    let worst_arm_id = tied[rng.random_range(0..tied.len())];
    span.record(fields::ARM_ID, worst_arm_id);
    span.record(fields::FAILURE_RATE, worst_failure_rate);
    events::worst_arm_selected(worst_arm_id, worst_failure_rate, tied.len());

    let next_demonstration = samples.get(&worst_arm_id).and_then(|worst| {
        let hardest = worst.hardest_failures();
        if hardest.is_empty() {
            return None;
        }
        let pick = hardest[rng.random_range(0..hardest.len())];
        worst.failure.get(pick).cloned()
    });

    Ok(PacReport {
        worst_arm_id,
        worst_failure_rate,
        next_demonstration,
        samples,
        samples_per_arm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_matches_the_bound() {
        assert_eq!(sample_count(2, 0.2, 0.05), 54);
        // ln(2·16/0.1) / (2·0.25²) = ln(320) / 0.125
        assert_eq!(sample_count(16, 0.25, 0.1), 46);
    }

    #[test]
    fn sample_count_never_underflows() {
        assert_eq!(sample_count(1, 0.5, 5.0), 0);
        assert_eq!(sample_count(0, 0.5, 0.1), 0);
    }
}
