//! # armada-bandit
//!
//! Treats each cell of the partitioned task space as a bandit arm and finds
//! the arm the current demonstrations cover worst.
//!
//! - [`partition`]: grid the task space into arms and place demonstrations.
//! - [`sampling`]: uniform task instances inside an arm.
//! - [`evaluator`]: ask the oracle about an arm's samples.
//! - [`pac`]: naive PAC worst-arm selection.
//! - [`success_search`]: bounded search for solvable task instances.
//!
//! All randomness comes from a caller-supplied `Rng`.

pub mod evaluator;
pub mod pac;
pub mod partition;
pub mod sampling;
pub mod settings;
pub mod success_search;

pub use evaluator::evaluate_arm;
pub use pac::{run_naive_pac, sample_count, PacReport};
pub use partition::{assign_demonstrations, partition};
pub use sampling::sample_task_instances;
pub use settings::{PacSettings, SearchSettings, TaskContext};
pub use success_search::{collect_successful_plans, SuccessfulPlan};
