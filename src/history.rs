//! Longitudinal association bookkeeping
//!
//! The engine appends one [`TimestepRecord`] per evaluation timestamp and
//! one entry per valid entity to the per-entity [`AssignmentSeries`].
//! Appends happen in strictly increasing time order and nothing is mutated
//! afterward; consumers only ever see read-only views.

use serde::Serialize;

/// Everything recorded about one evaluation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestepRecord {
    /// The timestamp.
    pub time: f64,
    /// Tracks with at least one gate-passing truth candidate, regardless
    /// of the solver's exclusive pick.
    pub num_associated: usize,
    /// Tracks the solver matched to a real truth row.
    pub num_assigned: usize,
    /// Valid track IDs at this timestamp, in snapshot order.
    pub valid_track_ids: Vec<u32>,
    /// Valid truth IDs at this timestamp, in snapshot order.
    pub valid_truth_ids: Vec<u32>,
    /// Per truth (parallel to `valid_truth_ids`): the assigned track, if any.
    pub truth_track_assignment: Vec<Option<u32>>,
    /// Per track (parallel to `valid_track_ids`): the assigned truth, if any.
    pub track_truth_assignment: Vec<Option<u32>>,
}

impl TimestepRecord {
    /// Number of valid truths at this timestamp.
    #[inline]
    pub fn num_valid_truths(&self) -> usize {
        self.valid_truth_ids.len()
    }

    /// Number of valid tracks at this timestamp.
    #[inline]
    pub fn num_valid_tracks(&self) -> usize {
        self.valid_track_ids.len()
    }
}

/// One entity's assignment history: for every timestamp at which the
/// entity was valid, the counterpart it was matched to (`None` when
/// unassigned at that step).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentSeries {
    times: Vec<f64>,
    counterparts: Vec<Option<u32>>,
}

impl AssignmentSeries {
    pub(crate) fn push(&mut self, time: f64, counterpart: Option<u32>) {
        self.times.push(time);
        self.counterparts.push(counterpart);
    }

    /// Timestamps at which the entity was valid, in increasing order.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Matched counterpart IDs, parallel to [`times`](Self::times).
    #[inline]
    pub fn counterparts(&self) -> &[Option<u32>] {
        &self.counterparts
    }

    /// Number of recorded timestamps.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the entity was never valid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The counterpart the entity was matched to most often, ignoring
    /// unassigned steps. Ties break toward the smaller ID.
    pub fn most_frequent_counterpart(&self) -> Option<u32> {
        let mut counts: Vec<(u32, usize)> = Vec::new();
        for id in self.counterparts.iter().flatten() {
            match counts.iter_mut().find(|(c, _)| c == id) {
                Some((_, n)) => *n += 1,
                None => counts.push((*id, 1)),
            }
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(id, _)| id)
    }
}
