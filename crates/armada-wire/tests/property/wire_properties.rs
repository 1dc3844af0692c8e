use std::io::Cursor;

use armada_core::errors::WireError;
use armada_core::geometry::Se3;
use armada_core::models::{Demonstration, PlanFailure, PlanResult, Point2};
use armada_core::traits::PlanRequest;
use armada_wire::{encode_request, read_plan_responses, read_request, write_plan_responses};
use armada_wire::{WireRead, WireWrite};
use proptest::prelude::*;

fn arb_i32() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(i32::MIN),
        Just(i32::MAX),
        Just(0),
        Just(-1),
        any::<i32>(),
    ]
}

fn arb_plan_result() -> impl Strategy<Value = PlanResult> {
    (
        any::<bool>(),
        arb_i32(),
        prop::collection::vec(prop::collection::vec(any::<f64>(), 0..8), 0..4),
        arb_i32(),
        arb_i32(),
    )
        .prop_map(|(ok, segments, plan, seg, joint)| {
            if ok {
                PlanResult::success(segments, plan)
            } else {
                PlanResult::failed(
                    segments,
                    plan,
                    PlanFailure {
                        screw_segment: seg,
                        joint_angle: joint,
                    },
                )
            }
        })
}

/// Attempt list in oracle shape: failures, optionally ending in one success.
fn arb_attempts(max_demos: usize) -> impl Strategy<Value = Vec<PlanResult>> {
    prop::collection::vec(arb_plan_result(), max_demos).prop_map(|mut attempts| {
        if let Some(pos) = attempts.iter().position(|a| a.is_successful) {
            attempts.truncate(pos + 1);
        }
        attempts
    })
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

// ── Primitives ───────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn int32_survives_the_wire(value in arb_i32()) {
        let mut buf = Vec::new();
        buf.write_i32(value).unwrap();
        prop_assert_eq!(buf.len(), 4);
        prop_assert_eq!(Cursor::new(buf).read_i32().unwrap(), value);
    }

    #[test]
    fn float64_is_bit_exact(value in any::<f64>()) {
        let mut buf = Vec::new();
        buf.write_f64(value).unwrap();
        prop_assert_eq!(Cursor::new(buf).read_f64().unwrap().to_bits(), value.to_bits());
    }

    #[test]
    fn strings_keep_their_utf8_bytes(value in "\\PC{0,40}") {
        let mut buf = Vec::new();
        buf.write_str(&value).unwrap();
        prop_assert_eq!(buf.len(), 4 + value.len());
        prop_assert_eq!(Cursor::new(buf).read_string().unwrap(), value);
    }

    #[test]
    fn any_truncation_is_incomplete(value in any::<f64>(), keep in 0usize..8) {
        let mut buf = Vec::new();
        buf.write_f64(value).unwrap();
        buf.truncate(keep);
        let err = Cursor::new(buf).read_f64().unwrap_err();
        let is_incomplete = matches!(
            err,
            WireError::IncompleteMessage { expected: 8, received } if received == keep
        );
        prop_assert!(is_incomplete);
    }
}

// ── Messages ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn request_is_decoded_as_sent(
        scores in prop::collection::vec(-1.0f64..1.0, 0..4),
        poses in prop::collection::vec(
            prop::collection::vec((-2.0f64..2.0, -2.0f64..2.0, -7.0f64..7.0), 1..3),
            0..5,
        ),
        joints in prop::collection::vec(any::<f64>(), 0..8),
    ) {
        let demos: Vec<Demonstration> = scores
            .iter()
            .enumerate()
            .map(|(i, score)| Demonstration {
                trajectory_file: format!("demo_{i}/joint_angles.csv"),
                object_poses_file: format!("demo_{i}/object_poses.csv"),
                score: *score,
                region_of_interest: 1.5,
                object_position: Point2::default(),
            })
            .collect();
        let demo_refs: Vec<&Demonstration> = demos.iter().collect();
        let instances: Vec<Vec<Se3>> = poses
            .iter()
            .map(|objs| objs.iter().map(|(x, y, h)| Se3::from_planar(*x, *y, *h, -0.064)).collect())
            .collect();
        let request = PlanRequest {
            demonstrations: &demo_refs,
            initial_joint_config: &joints,
            task_instances: &instances,
        };

        let bytes = encode_request(&request).unwrap();
        let decoded = read_request(&mut Cursor::new(bytes)).unwrap();

        prop_assert_eq!(decoded.demonstrations.len(), demos.len());
        for (wire, demo) in decoded.demonstrations.iter().zip(&demos) {
            prop_assert_eq!(&wire.trajectory_file, &demo.trajectory_file);
            prop_assert_eq!(wire.score.to_bits(), demo.score.to_bits());
        }
        prop_assert_eq!(decoded.task_instances, instances);
        prop_assert_eq!(bits(&decoded.initial_joint_config), bits(&joints));
    }

    #[test]
    fn responses_are_decoded_as_sent(
        responses in prop::collection::vec(arb_attempts(4), 0..6),
    ) {
        let mut buf = Vec::new();
        write_plan_responses(&mut buf, &responses).unwrap();
        let decoded = read_plan_responses(&mut Cursor::new(buf), responses.len(), 4).unwrap();

        prop_assert_eq!(decoded.len(), responses.len());
        for (got, sent) in decoded.iter().zip(&responses) {
            prop_assert_eq!(got.len(), sent.len());
            for (a, b) in got.iter().zip(sent) {
                prop_assert_eq!(a.is_successful, b.is_successful);
                prop_assert_eq!(a.n_screw_segments, b.n_screw_segments);
                prop_assert_eq!(a.failure, b.failure);
                let a_bits: Vec<Vec<u64>> = a.plan.iter().map(|v| bits(v)).collect();
                let b_bits: Vec<Vec<u64>> = b.plan.iter().map(|v| bits(v)).collect();
                prop_assert_eq!(a_bits, b_bits);
            }
        }
    }
}
