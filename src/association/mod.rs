//! Per-timestep association: snapshots, gated costs, optimal assignment
//!
//! One timestamp's work is a pipeline over these pieces: extract the valid
//! truth and track [`Snapshot`]s, build the gated cost matrix, and hand it
//! to an [`AssignmentSolver`] for the minimum-cost column-to-row matching.

pub mod cost;
pub mod snapshot;
pub mod solver;

pub use cost::{build_cost_matrix, column_has_candidate};
pub use snapshot::Snapshot;
pub use solver::{AssignmentSolver, JonkerVolgenant};
