use armada_bandit::{partition, sample_task_instances};
use armada_core::models::Dimension;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_dimension(name: &'static str) -> impl Strategy<Value = Dimension> {
    (-5.0f64..5.0, 0.0f64..3.0, 1usize..4)
        .prop_map(move |(min, width, n)| Dimension::new(name, min, min + width, n))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn samples_stay_inside_their_arm(
        x in arb_dimension("x"),
        y in arb_dimension("y"),
        theta in arb_dimension("θ"),
        n_objects in 1usize..3,
        seed in any::<u64>(),
    ) {
        let arms = partition(&[x, y, theta], n_objects);
        let mut rng = StdRng::seed_from_u64(seed);
        for arm in arms.iter().take(6) {
            let instances = sample_task_instances(&mut rng, arm, n_objects, 10).unwrap();
            prop_assert_eq!(instances.len(), 10);
            for instance in &instances {
                prop_assert_eq!(instance.poses.len(), n_objects);
                for (value, bound) in instance.coordinates().iter().zip(&arm.segment) {
                    prop_assert!(bound.contains(*value), "{} outside [{}, {}]", value, bound.low, bound.high);
                }
            }
        }
    }

    #[test]
    fn partition_covers_every_combination(
        x in arb_dimension("x"),
        y in arb_dimension("y"),
        theta in arb_dimension("θ"),
    ) {
        let expected = x.n_segments * y.n_segments * theta.n_segments;
        let arms = partition(&[x, y, theta], 1);
        prop_assert_eq!(arms.len(), expected);
        for (i, arm) in arms.iter().enumerate() {
            prop_assert_eq!(arm.id as usize, i + 1);
        }
    }
}
