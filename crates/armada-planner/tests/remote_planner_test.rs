use std::thread;
use std::time::{Duration, Instant};

use armada_core::errors::{ArmadaErrorCode, PlannerError, WireError};
use armada_core::geometry::Se3;
use armada_core::models::{Demonstration, Point2};
use armada_core::traits::{Cancellable, CancellationToken, PlanRequest, PlanningOracle};
use armada_planner::{OracleAddress, RemotePlanner};
use test_fixtures::{planar_policy, MockOracle, ServerBehavior};

fn demo(name: &str, score: f64) -> Demonstration {
    Demonstration {
        trajectory_file: format!("{name}/joint_angles.csv"),
        object_poses_file: format!("{name}/object_poses.csv"),
        score,
        region_of_interest: 1.5,
        object_position: Point2::new(0.9, 0.3),
    }
}

fn planner_for(oracle: &MockOracle) -> RemotePlanner {
    let address: OracleAddress = oracle.address().parse().unwrap();
    RemotePlanner::new(address)
        .with_connect_timeout(Duration::from_secs(2))
        .with_request_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(20))
}

/// Solvable when the object sits at x < 1.0.
fn left_half() -> test_fixtures::Policy {
    planar_policy(|x, _| x < 1.0)
}

fn exchange(planner: &RemotePlanner) -> Result<Vec<Vec<armada_core::PlanResult>>, PlannerError> {
    let (a, b) = (demo("a", 0.4), demo("b", 0.2));
    let demos = [&a, &b];
    let instances = vec![
        vec![Se3::from_planar(0.8, 0.1, 0.0, -0.06)],
        vec![Se3::from_planar(1.1, 0.1, 0.0, -0.06)],
    ];
    let joints = [0.0; 7];
    planner.request_plans(&PlanRequest {
        demonstrations: &demos,
        initial_joint_config: &joints,
        task_instances: &instances,
    })
}

#[test]
fn tcp_exchange_follows_early_exit() {
    let oracle = MockOracle::tcp(left_half());
    let responses = exchange(&planner_for(&oracle)).unwrap();

    assert_eq!(responses.len(), 2);
    // Solved by the first demonstration, so only one attempt.
    assert_eq!(responses[0].len(), 1);
    assert!(responses[0][0].is_successful);
    // Unsolvable: one failed attempt per demonstration.
    assert_eq!(responses[1].len(), 2);
    assert!(responses[1].iter().all(|r| !r.is_successful));
    assert_eq!(responses[1][0].failure_progress(), Some(0.25));

    let seen = oracle.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].demonstrations[0].trajectory_file, "a/joint_angles.csv");
    assert_eq!(seen[0].initial_joint_config, vec![0.0; 7]);
}

#[cfg(unix)]
#[test]
fn unix_socket_exchange() {
    let oracle = MockOracle::unix(left_half());
    let responses = exchange(&planner_for(&oracle)).unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses[0][0].is_successful);
}

#[test]
fn each_request_opens_a_fresh_connection() {
    let oracle = MockOracle::tcp(left_half());
    let planner = planner_for(&oracle);
    exchange(&planner).unwrap();
    exchange(&planner).unwrap();
    assert_eq!(oracle.requests().len(), 2);
}

#[test]
fn truncated_response_is_incomplete_message() {
    let oracle = MockOracle::tcp_with(left_half(), ServerBehavior::Truncate { keep: 10 });
    let err = exchange(&planner_for(&oracle)).unwrap_err();
    assert!(
        matches!(err, PlannerError::Wire(WireError::IncompleteMessage { .. })),
        "unexpected error: {err}"
    );
    assert_eq!(err.error_code(), "INCOMPLETE_MESSAGE");
}

#[test]
fn stalled_oracle_hits_the_deadline() {
    let oracle = MockOracle::tcp_with(left_half(), ServerBehavior::Stall(Duration::from_secs(10)));
    let planner = planner_for(&oracle).with_request_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let err = exchange(&planner).unwrap_err();
    assert!(matches!(err, PlannerError::Timeout { timeout_ms: 200 }), "unexpected error: {err}");
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn cancellation_aborts_a_blocked_request() {
    let oracle = MockOracle::tcp_with(left_half(), ServerBehavior::Stall(Duration::from_secs(10)));
    let token = CancellationToken::new();
    let planner = planner_for(&oracle).with_cancellation(token.clone());

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        token.cancel();
    });
    let err = exchange(&planner).unwrap_err();
    canceller.join().unwrap();
    assert!(matches!(err, PlannerError::Cancelled), "unexpected error: {err}");
}

#[test]
fn hangup_is_a_connection_or_framing_error() {
    let oracle = MockOracle::tcp_with(left_half(), ServerBehavior::Hangup);
    let err = exchange(&planner_for(&oracle)).unwrap_err();
    assert!(
        matches!(
            err,
            PlannerError::ConnectionFailure { .. }
                | PlannerError::Wire(WireError::IncompleteMessage { .. })
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn refused_connection_is_reported() {
    // Bind then drop to find a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let planner = RemotePlanner::new(format!("127.0.0.1:{port}").parse().unwrap());
    let err = exchange(&planner).unwrap_err();
    assert!(matches!(err, PlannerError::ConnectionFailure { .. }), "unexpected error: {err}");
    assert_eq!(err.error_code(), "CONNECTION_FAILURE");
}

#[test]
fn empty_request_skips_the_network() {
    let planner = RemotePlanner::new("127.0.0.1:9".parse().unwrap());
    let joints = [0.0; 7];
    let responses = planner
        .request_plans(&PlanRequest {
            demonstrations: &[],
            initial_joint_config: &joints,
            task_instances: &[],
        })
        .unwrap();
    assert!(responses.is_empty());
}

#[test]
fn from_config_parses_the_address() {
    let config = armada_core::config::OracleConfig {
        address: Some("tcp://127.0.0.1:4100".to_string()),
        request_timeout_ms: Some(1_000),
        ..Default::default()
    };
    let planner = RemotePlanner::from_config(&config).unwrap();
    assert_eq!(planner.address().to_string(), "tcp://127.0.0.1:4100");
    assert!(!planner.cancellation_token().is_cancelled());
}
