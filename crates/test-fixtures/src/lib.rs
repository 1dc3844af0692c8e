//! Test support for the armada workspace.
//!
//! - [`MockOracle`]: an in-process oracle server speaking the real wire
//!   protocol on an ephemeral TCP port or a Unix socket.
//! - [`FnOracle`]: an in-memory `PlanningOracle` driven by a closure.
//! - [`DemoDirBuilder`]: writes demonstration directories in the on-disk
//!   layout the loader reads.
//!
//! Helpers here panic on setup failure; they are for tests only.

mod demo_dir;
mod oracle;
mod server;

pub use demo_dir::{DemoDirBuilder, DemoSpec};
pub use oracle::{planar_policy, FnOracle, Policy, Probe, RecordedCall};
pub use server::{MockOracle, ServerBehavior};
