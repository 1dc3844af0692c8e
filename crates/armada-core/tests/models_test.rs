use armada_core::models::{
    by_descending_score, ArmSampleMetadata, Demonstration, ObjectPose, PlanFailure, PlanResult,
    Point2, TaskInstance,
};

fn demo(name: &str, score: f64) -> Demonstration {
    Demonstration {
        trajectory_file: format!("{name}/joint_angles.csv"),
        object_poses_file: format!("{name}/object_poses.csv"),
        score,
        region_of_interest: 1.5,
        object_position: Point2::default(),
    }
}

fn instance(x: f64) -> TaskInstance {
    TaskInstance::new(vec![ObjectPose::new(x, 0.0, 0.0)])
}

#[test]
fn demonstrations_sort_by_descending_score_stably() {
    let demos = vec![demo("a", 0.1), demo("b", 0.5), demo("c", -1.0), demo("d", 0.5)];
    let names: Vec<&str> = by_descending_score(&demos)
        .iter()
        .map(|d| d.trajectory_file.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "b/joint_angles.csv",
            "d/joint_angles.csv",
            "a/joint_angles.csv",
            "c/joint_angles.csv"
        ]
    );
}

#[test]
fn failure_progress_is_fraction_of_segments() {
    let failed = PlanResult::failed(
        4,
        vec![],
        PlanFailure {
            screw_segment: 3,
            joint_angle: 5,
        },
    );
    assert_eq!(failed.failure_progress(), Some(0.75));
    assert_eq!(PlanResult::success(4, vec![]).failure_progress(), None);
}

#[test]
fn zero_segment_failure_made_no_progress() {
    let failed = PlanResult::failed(
        0,
        vec![],
        PlanFailure {
            screw_segment: 1,
            joint_angle: -1,
        },
    );
    assert_eq!(failed.failure_progress(), Some(0.0));
}

#[test]
fn failure_rate_is_none_without_samples() {
    assert_eq!(ArmSampleMetadata::default().failure_rate(), None);
}

#[test]
fn hardest_failures_are_the_minimum_scores() {
    let meta = ArmSampleMetadata {
        success: vec![instance(0.0)],
        failure: vec![instance(1.0), instance(2.0), instance(3.0)],
        failure_score: vec![0.5, 0.25, 0.25],
    };
    assert_eq!(meta.failure_rate(), Some(0.75));
    assert_eq!(meta.min_failure_score(), Some(0.25));
    assert_eq!(meta.hardest_failures(), vec![1, 2]);
}

#[test]
fn task_instance_coordinates_round_trip() {
    let t = TaskInstance::from_coordinates(&[1.0, 2.0, 0.5, 3.0, 4.0, 1.5]).unwrap();
    assert_eq!(t.poses.len(), 2);
    assert_eq!(t.coordinates(), vec![1.0, 2.0, 0.5, 3.0, 4.0, 1.5]);
    assert!(TaskInstance::from_coordinates(&[1.0, 2.0]).is_none());
}
