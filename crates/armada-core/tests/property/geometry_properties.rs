use armada_core::geometry::Se3;
use armada_core::models::ObjectPose;
use proptest::prelude::*;

proptest! {
    #[test]
    fn planar_lift_is_rigid(
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
        heading in -20.0f64..20.0,
        z in -1.0f64..1.0,
    ) {
        let t = Se3::from_planar(x, y, heading, z);
        prop_assert!(t.is_rigid(1e-9));
        prop_assert!((t.rotation_determinant() - 1.0).abs() < 1e-9);
        let translation = t.translation();
        prop_assert_eq!(translation[0], x);
        prop_assert_eq!(translation[1], y);
    }

    #[test]
    fn object_pose_lift_keeps_position(x in -2.0f64..2.0, y in -2.0f64..2.0, heading in 0.0f64..6.3) {
        let t = ObjectPose::new(x, y, heading).to_se3(-0.064);
        let flat = t.to_row_major();
        prop_assert_eq!(flat[3], x);
        prop_assert_eq!(flat[7], y);
        prop_assert_eq!(&flat[12..], &[0.0, 0.0, 0.0, 1.0]);
    }
}
