//! Seams between the bandit and its collaborators.

pub mod cancellation;
pub mod oracle;

pub use cancellation::{Cancellable, CancellationToken};
pub use oracle::{PlanRequest, PlanningOracle};
