//! SIAP accuracy metrics
//!
//! Reduces the accumulated per-timestep counts into the three aggregate
//! ratios and their time series:
//!
//! - **completeness**: assigned tracks over valid truths; how much of the
//!   truth picture the tracker covers.
//! - **false-track ratio**: tracks with no gate-passing truth candidate
//!   over valid tracks. Counting associated (not assigned) tracks as good
//!   means track duals are not penalized here.
//! - **ambiguity**: assigned over associated tracks; 1.0 means no track
//!   duals, lower values mean several tracks competed for the same truths.
//!
//! Overall values are time-weighted (summed numerators over summed
//! denominators), not averages of the per-step ratios. A ratio whose
//! denominator is zero is reported as `None`, never as a silent zero.

use serde::Serialize;

use crate::history::TimestepRecord;

/// One metric's per-timestep values plus its time-weighted overall value.
///
/// `values` is parallel to `times`; an entry is `None` at timestamps where
/// the metric's denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    /// Evaluation timestamps.
    pub times: Vec<f64>,
    /// Per-timestep ratio, where defined.
    pub values: Vec<Option<f64>>,
    /// Time-weighted overall ratio, where defined.
    pub overall: Option<f64>,
}

/// The three SIAP summary metrics for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiapSummary {
    /// Assigned tracks / valid truths.
    pub completeness: MetricSeries,
    /// Non-associated tracks / valid tracks.
    pub false_track_ratio: MetricSeries,
    /// Assigned tracks / associated tracks.
    pub ambiguity: MetricSeries,
}

impl SiapSummary {
    /// Aggregate the per-timestep records of a completed run.
    pub fn compute(time_data: &[TimestepRecord]) -> Self {
        let times: Vec<f64> = time_data.iter().map(|r| r.time).collect();

        let completeness = reduce(&times, time_data, |r| {
            (r.num_assigned, r.num_valid_truths())
        });
        let false_track_ratio = reduce(&times, time_data, |r| {
            (r.num_valid_tracks() - r.num_associated, r.num_valid_tracks())
        });
        let ambiguity = reduce(&times, time_data, |r| (r.num_assigned, r.num_associated));

        Self {
            completeness,
            false_track_ratio,
            ambiguity,
        }
    }

    /// Serialize to pretty-printed JSON for downstream reporting tooling.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Build one metric series from a per-record (numerator, denominator) pair.
fn reduce<F>(times: &[f64], time_data: &[TimestepRecord], terms: F) -> MetricSeries
where
    F: Fn(&TimestepRecord) -> (usize, usize),
{
    let mut numerator_sum = 0usize;
    let mut denominator_sum = 0usize;
    let mut values = Vec::with_capacity(time_data.len());

    for record in time_data {
        let (numerator, denominator) = terms(record);
        numerator_sum += numerator;
        denominator_sum += denominator;
        values.push(ratio(numerator, denominator));
    }

    MetricSeries {
        times: times.to_vec(),
        values,
        overall: ratio(numerator_sum, denominator_sum),
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}
