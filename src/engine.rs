//! Track-to-truth association engine
//!
//! The engine owns one evaluation run: it fixes the evaluation time axis
//! from the track data, resamples truth onto it, and then walks the axis in
//! strictly increasing order. Each timestamp goes through the same
//! sequence: build the gated cost matrix, solve the assignment, classify
//! every track and truth, append to the histories. The histories are owned
//! exclusively by the engine and handed out as read-only views.

use std::collections::BTreeMap;

use log::debug;

use crate::association::{
    build_cost_matrix, column_has_candidate, AssignmentSolver, JonkerVolgenant, Snapshot,
};
use crate::config::AssociationConfig;
use crate::errors::EvalError;
use crate::history::{AssignmentSeries, TimestepRecord};
use crate::metrics::SiapSummary;
use crate::series::SeriesStore;

/// One evaluation run over a track store and a truth store.
///
/// Constructed fresh per run. Construction validates the configuration and
/// the input integrity (no duplicate records), then resamples every truth
/// entity onto the track time axis; no timestep is processed until
/// [`associate`](Self::associate) is called.
#[derive(Debug)]
pub struct AssociationEngine {
    config: AssociationConfig,
    solver: Box<dyn AssignmentSolver>,
    tracks: SeriesStore,
    truths: SeriesStore,
    axis: Vec<f64>,
    time_data: Vec<TimestepRecord>,
    truth_assignments: BTreeMap<u32, AssignmentSeries>,
    track_assignments: BTreeMap<u32, AssignmentSeries>,
}

impl AssociationEngine {
    /// Create an engine with the default assignment solver.
    pub fn new(
        tracks: SeriesStore,
        truths: SeriesStore,
        config: AssociationConfig,
    ) -> Result<Self, EvalError> {
        Self::with_solver(tracks, truths, config, Box::new(JonkerVolgenant))
    }

    /// Create an engine with a caller-supplied assignment solver.
    pub fn with_solver(
        tracks: SeriesStore,
        mut truths: SeriesStore,
        config: AssociationConfig,
        solver: Box<dyn AssignmentSolver>,
    ) -> Result<Self, EvalError> {
        config.validate()?;
        tracks.ensure_unique_times()?;
        truths.ensure_unique_times()?;

        // Tracks define the evaluation cadence; truth is made
        // commensurable by resampling, without extrapolation.
        let axis = tracks.unique_timestamps().to_vec();
        truths.resample_to_axis(&axis);

        let mut engine = Self {
            config,
            solver,
            tracks,
            truths,
            axis,
            time_data: Vec::new(),
            truth_assignments: BTreeMap::new(),
            track_assignments: BTreeMap::new(),
        };
        engine.reset_histories();
        Ok(engine)
    }

    /// Run the association over the whole time axis.
    ///
    /// Any accumulated state from a previous call is discarded first, so
    /// repeated calls reproduce the same histories rather than appending
    /// to them.
    pub fn associate(&mut self) -> Result<(), EvalError> {
        self.time_data.clear();
        self.reset_histories();

        for step in 0..self.axis.len() {
            let time = self.axis[step];
            let truth_snap = Snapshot::at(&self.truths, time, &self.config.position_fields)?;
            let track_snap = Snapshot::at(&self.tracks, time, &self.config.position_fields)?;

            let cost = build_cost_matrix(&truth_snap, &track_snap, &self.config);
            let assignment = self.solver.solve(&cost)?;

            let num_truth = truth_snap.len();
            let num_track = track_snap.len();

            let num_associated = (0..num_track)
                .filter(|&col| {
                    column_has_candidate(&cost, num_truth, col, self.config.impossible_cost)
                })
                .count();

            let mut truth_track_assignment = vec![None; num_truth];
            let mut track_truth_assignment = vec![None; num_track];
            let mut num_assigned = 0usize;
            for (col, &row) in assignment.iter().enumerate() {
                if row < num_truth {
                    num_assigned += 1;
                    truth_track_assignment[row] = Some(track_snap.id(col));
                    track_truth_assignment[col] = Some(truth_snap.id(row));
                }
            }

            for (idx, &id) in truth_snap.ids().iter().enumerate() {
                self.truth_assignments
                    .entry(id)
                    .or_default()
                    .push(time, truth_track_assignment[idx]);
            }
            for (idx, &id) in track_snap.ids().iter().enumerate() {
                self.track_assignments
                    .entry(id)
                    .or_default()
                    .push(time, track_truth_assignment[idx]);
            }

            debug!(
                "t={}: {}/{} truths assigned, {}/{} tracks associated",
                time, num_assigned, num_truth, num_associated, num_track
            );

            self.time_data.push(TimestepRecord {
                time,
                num_associated,
                num_assigned,
                valid_track_ids: track_snap.ids().to_vec(),
                valid_truth_ids: truth_snap.ids().to_vec(),
                truth_track_assignment,
                track_truth_assignment,
            });
        }

        Ok(())
    }

    /// The evaluation time axis (sorted unique track timestamps).
    #[inline]
    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    /// The configuration this run was constructed with.
    #[inline]
    pub fn config(&self) -> &AssociationConfig {
        &self.config
    }

    /// Per-timestep records, in time order.
    #[inline]
    pub fn time_data(&self) -> &[TimestepRecord] {
        &self.time_data
    }

    /// Per-truth assignment history, keyed by truth ID. Every truth entity
    /// has an entry; one that was never valid has an empty series.
    #[inline]
    pub fn truth_assignments(&self) -> &BTreeMap<u32, AssignmentSeries> {
        &self.truth_assignments
    }

    /// Per-track assignment history, keyed by track ID.
    #[inline]
    pub fn track_assignments(&self) -> &BTreeMap<u32, AssignmentSeries> {
        &self.track_assignments
    }

    /// Aggregate the run into the SIAP summary metrics.
    pub fn metrics(&self) -> SiapSummary {
        SiapSummary::compute(&self.time_data)
    }

    fn reset_histories(&mut self) {
        self.truth_assignments = self
            .truths
            .ids()
            .map(|id| (id, AssignmentSeries::default()))
            .collect();
        self.track_assignments = self
            .tracks
            .ids()
            .map(|id| (id, AssignmentSeries::default()))
            .collect();
    }
}
