//! Request and response layouts of the planning-oracle protocol.
//!
//! Request (client → oracle):
//!
//! ```text
//! int32 demo_count
//!   per demo: string trajectory_file, string object_poses_file,
//!             float64 region_of_interest, float64 score
//! int32 instance_count
//!   per instance: int32 pose_count
//!     per pose: int32 16, 16 × float64 (row-major 4x4 transform)
//! int32 joint_count, joint_count × float64
//! ```
//!
//! Response (oracle → client), per instance, per demonstration in request
//! order, stopping after the first success:
//!
//! ```text
//! int32 screw_segment_count
//! int32 vector_count, per vector: int32 len, len × float64
//! bool  success
//! if !success: int32 failed_segment, int32 failed_joint
//! ```

use std::io::{Read, Write};

use armada_core::constants::TRANSFORM_LEN;
use armada_core::errors::WireError;
use armada_core::geometry::Se3;
use armada_core::models::{PlanFailure, PlanResult};
use armada_core::traits::PlanRequest;

use crate::codec::{WireRead, WireWrite};

/// A demonstration as it travels on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct WireDemonstration {
    pub trajectory_file: String,
    pub object_poses_file: String,
    pub region_of_interest: f64,
    pub score: f64,
}

/// A request as seen by the oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRequest {
    pub demonstrations: Vec<WireDemonstration>,
    pub task_instances: Vec<Vec<Se3>>,
    pub initial_joint_config: Vec<f64>,
}

/// Serialize a request.
pub fn write_request<W: Write + ?Sized>(
    writer: &mut W,
    request: &PlanRequest<'_>,
) -> Result<(), WireError> {
    writer.write_count(request.demonstrations.len(), "demonstration count")?;
    for demo in request.demonstrations {
        writer.write_str(&demo.trajectory_file)?;
        writer.write_str(&demo.object_poses_file)?;
        writer.write_f64(demo.region_of_interest)?;
        writer.write_f64(demo.score)?;
    }

    writer.write_count(request.task_instances.len(), "task instance count")?;
    for poses in request.task_instances {
        writer.write_count(poses.len(), "pose count")?;
        for pose in poses {
            writer.write_f64_slice(&pose.to_row_major(), "transform length")?;
        }
    }

    writer.write_f64_slice(request.initial_joint_config, "joint count")?;
    Ok(())
}

/// Serialize a request into one buffer, so it can go out in a single write.
pub fn encode_request(request: &PlanRequest<'_>) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    write_request(&mut buf, request)?;
    tracing::trace!(
        bytes = buf.len(),
        instances = request.task_instances.len(),
        "request encoded"
    );
    Ok(buf)
}

/// Deserialize a request (oracle side).
pub fn read_request<R: Read + ?Sized>(reader: &mut R) -> Result<DecodedRequest, WireError> {
    let demo_count = reader.read_count("demonstration count")?;
    let mut demonstrations = Vec::with_capacity(demo_count);
    for _ in 0..demo_count {
        demonstrations.push(WireDemonstration {
            trajectory_file: reader.read_string()?,
            object_poses_file: reader.read_string()?,
            region_of_interest: reader.read_f64()?,
            score: reader.read_f64()?,
        });
    }

    let instance_count = reader.read_count("task instance count")?;
    let mut task_instances = Vec::with_capacity(instance_count);
    for _ in 0..instance_count {
        let pose_count = reader.read_count("pose count")?;
        let mut poses = Vec::with_capacity(pose_count);
        for _ in 0..pose_count {
            let values = reader.read_f64_vec("transform length")?;
            let pose = Se3::from_row_major(&values).ok_or(WireError::InvalidLength {
                field: "transform length",
                value: values.len() as i64,
            })?;
            poses.push(pose);
        }
        task_instances.push(poses);
    }

    let initial_joint_config = reader.read_f64_vec("joint count")?;

    Ok(DecodedRequest {
        demonstrations,
        task_instances,
        initial_joint_config,
    })
}

/// Deserialize one plan attempt.
pub fn read_plan_result<R: Read + ?Sized>(reader: &mut R) -> Result<PlanResult, WireError> {
    let n_screw_segments = reader.read_i32()?;
    let vector_count = reader.read_count("joint vector count")?;
    let mut plan = Vec::with_capacity(vector_count);
    for _ in 0..vector_count {
        plan.push(reader.read_f64_vec("joint vector length")?);
    }

    if reader.read_bool()? {
        return Ok(PlanResult::success(n_screw_segments, plan));
    }
    let failure = PlanFailure {
        screw_segment: reader.read_i32()?,
        joint_angle: reader.read_i32()?,
    };
    Ok(PlanResult::failed(n_screw_segments, plan, failure))
}

/// Deserialize the full response for `instance_count` task instances probed
/// with `demo_count` demonstrations each.
///
/// Within an instance the attempt list ends at the first success, so its
/// length is between 1 and `demo_count`.
pub fn read_plan_responses<R: Read + ?Sized>(
    reader: &mut R,
    instance_count: usize,
    demo_count: usize,
) -> Result<Vec<Vec<PlanResult>>, WireError> {
    let mut responses = Vec::with_capacity(instance_count);
    for _ in 0..instance_count {
        let mut attempts = Vec::with_capacity(demo_count);
        for _ in 0..demo_count {
            let attempt = read_plan_result(reader)?;
            let solved = attempt.is_successful;
            attempts.push(attempt);
            if solved {
                break;
            }
        }
        responses.push(attempts);
    }
    Ok(responses)
}

/// Serialize one plan attempt (oracle side).
pub fn write_plan_result<W: Write + ?Sized>(
    writer: &mut W,
    result: &PlanResult,
) -> Result<(), WireError> {
    writer.write_i32(result.n_screw_segments)?;
    writer.write_count(result.plan.len(), "joint vector count")?;
    for vector in &result.plan {
        writer.write_f64_slice(vector, "joint vector length")?;
    }
    writer.write_bool(result.is_successful)?;
    if !result.is_successful {
        let failure = result.failure.unwrap_or(PlanFailure {
            screw_segment: 0,
            joint_angle: -1,
        });
        writer.write_i32(failure.screw_segment)?;
        writer.write_i32(failure.joint_angle)?;
    }
    Ok(())
}

/// Serialize a full response (oracle side). Each attempt list is written
/// as given; callers end it at the first success.
pub fn write_plan_responses<W: Write + ?Sized>(
    writer: &mut W,
    responses: &[Vec<PlanResult>],
) -> Result<(), WireError> {
    for attempts in responses {
        for attempt in attempts {
            write_plan_result(writer, attempt)?;
        }
    }
    Ok(())
}

/// Bytes a single transform occupies on the wire, including its length.
pub const TRANSFORM_WIRE_BYTES: usize = 4 + TRANSFORM_LEN * 8;

#[cfg(test)]
mod tests {
    use super::*;
    use armada_core::models::{Demonstration, Point2};
    use std::io::Cursor;

    fn demo(name: &str, score: f64) -> Demonstration {
        Demonstration {
            trajectory_file: format!("{name}/joint_angles.csv"),
            object_poses_file: format!("{name}/object_poses.csv"),
            score,
            region_of_interest: 1.5,
            object_position: Point2::new(0.9, 0.2),
        }
    }

    #[test]
    fn request_layout_matches_the_oracle() {
        let d = demo("demo1", 0.25);
        let demos = [&d];
        let instances = vec![vec![Se3::from_planar(0.8, 0.1, 0.0, -0.06)]];
        let joints = [0.1, 0.2];
        let request = PlanRequest {
            demonstrations: &demos,
            initial_joint_config: &joints,
            task_instances: &instances,
        };
        let bytes = encode_request(&request).unwrap();

        let strings = 4 + d.trajectory_file.len() + 4 + d.object_poses_file.len();
        let expected_len = 4 + strings + 16 + 4 + 4 + TRANSFORM_WIRE_BYTES + 4 + 16;
        assert_eq!(bytes.len(), expected_len);
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);

        let decoded = read_request(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.demonstrations[0].trajectory_file, d.trajectory_file);
        assert_eq!(decoded.demonstrations[0].score, 0.25);
        assert_eq!(decoded.task_instances, instances);
        assert_eq!(decoded.initial_joint_config, vec![0.1, 0.2]);
    }

    #[test]
    fn response_stops_at_first_success() {
        let failed = PlanResult::failed(
            5,
            vec![vec![0.0; 7]],
            PlanFailure {
                screw_segment: 2,
                joint_angle: 3,
            },
        );
        let solved = PlanResult::success(5, vec![vec![0.1; 7], vec![0.2; 7]]);
        let responses = vec![vec![failed.clone(), solved.clone()], vec![solved.clone()]];

        let mut buf = Vec::new();
        write_plan_responses(&mut buf, &responses).unwrap();

        let decoded = read_plan_responses(&mut Cursor::new(buf), 2, 3).unwrap();
        assert_eq!(decoded, responses);
    }

    #[test]
    fn all_failures_read_every_demonstration() {
        let failed = PlanResult::failed(
            4,
            vec![],
            PlanFailure {
                screw_segment: 1,
                joint_angle: -1,
            },
        );
        let responses = vec![vec![failed.clone(), failed.clone()]];
        let mut buf = Vec::new();
        write_plan_responses(&mut buf, &responses).unwrap();
        let decoded = read_plan_responses(&mut Cursor::new(buf), 1, 2).unwrap();
        assert_eq!(decoded[0].len(), 2);
    }

    #[test]
    fn truncated_response_is_incomplete() {
        let solved = PlanResult::success(3, vec![vec![0.5; 7]]);
        let mut buf = Vec::new();
        write_plan_responses(&mut buf, &[vec![solved]]).unwrap();
        buf.truncate(buf.len() - 3);
        let err = read_plan_responses(&mut Cursor::new(buf), 1, 1).unwrap_err();
        assert!(matches!(err, WireError::IncompleteMessage { .. }));
    }

    #[test]
    fn malformed_transform_is_rejected() {
        let mut buf = Vec::new();
        buf.write_i32(0).unwrap(); // no demos
        buf.write_i32(1).unwrap(); // one instance
        buf.write_i32(1).unwrap(); // one pose
        buf.write_f64_slice(&[1.0; 9], "transform length").unwrap();
        buf.write_i32(0).unwrap();
        let err = read_request(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, WireError::InvalidLength { value: 9, .. }));
    }
}
