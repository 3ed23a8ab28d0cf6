/*!
# Track-to-truth evaluation

Evaluates a multi-object tracker against ground-truth trajectories:
per-timestep gated optimal assignment of tracks to truths, longitudinal
bookkeeping of who-was-matched-to-whom, and SIAP-style summary metrics
(completeness, false-track ratio, ambiguity).

## How a run works

Tracks define the evaluation cadence: the engine takes the sorted unique
track timestamps as the time axis and resamples every truth entity onto it
with linear interpolation (never extrapolating beyond a truth's own span).
At each timestamp it extracts the valid tracks and truths, builds a gated
cost matrix with a synthetic "new track" fallback row per track, solves the
minimum-cost assignment, and appends the outcome to the per-entity
histories. The metrics aggregator reduces those histories once at the end.

## Modules

- [`series`] - entity time series, table ingestion, resampling
- [`association`] - snapshots, gated cost matrices, the assignment solver
- [`engine`] - the per-timestep loop and assignment histories
- [`metrics`] - the SIAP summary aggregation
- [`config`] - gate and cost constants, validated at construction

## Example

```rust,no_run
use siap_eval_rs::{AssociationConfig, AssociationEngine, SeriesStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tracks = SeriesStore::load("tracks.txt")?;
    let truths = SeriesStore::load("truth.txt")?;

    let mut engine = AssociationEngine::new(tracks, truths, AssociationConfig::default())?;
    engine.associate()?;

    let summary = engine.metrics();
    println!("{}", summary.to_json_pretty());
    Ok(())
}
```
*/

pub mod association;
pub mod config;
pub mod engine;
pub mod errors;
pub mod history;
pub mod metrics;
pub mod series;

// Core types
pub use config::AssociationConfig;
pub use engine::AssociationEngine;
pub use history::{AssignmentSeries, TimestepRecord};
pub use metrics::{MetricSeries, SiapSummary};
pub use series::{EntitySeries, Record, SeriesStore};

// Errors
pub use errors::{AssociationError, EvalError};

// Assignment primitive
pub use association::{AssignmentSolver, JonkerVolgenant, Snapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
