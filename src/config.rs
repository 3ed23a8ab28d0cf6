//! Association configuration
//!
//! The gating and cost constants that shape every per-timestep cost matrix.
//! They are validated once, when the engine is constructed, so a bad
//! combination is rejected before any timestep is processed.

use serde::Serialize;

use crate::errors::EvalError;

/// Default association gate distance.
pub const DEFAULT_GATE: f64 = 2.0;

/// Default cost of leaving a track unassigned ("new track" fallback).
pub const DEFAULT_NEW_TRACK_COST: f64 = 10.0;

/// Default sentinel cost for gate-failing pairs.
pub const DEFAULT_IMPOSSIBLE_COST: f64 = 1.0e10;

/// Minimum factor by which the impossible sentinel must exceed both the
/// gate and the new-track cost.
pub const SENTINEL_MARGIN: f64 = 1.0e3;

/// Gating and cost constants for track-to-truth association.
///
/// A truth/track pair closer than `gate` gets its Euclidean distance as
/// cost; anything at or beyond the gate gets `impossible_cost`. Each track
/// column also carries a synthetic row with `new_track_cost`, so the solver
/// always has a feasible fallback and prefers a true in-gate association
/// over declaring the track new.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationConfig {
    /// Maximum distance at which a truth/track pair may associate.
    pub gate: f64,
    /// Cost of the synthetic "new/unassociated track" row.
    pub new_track_cost: f64,
    /// Sentinel cost for pairs that fail the gate. Must exceed every real
    /// cost by orders of magnitude so the solver never picks a gated-out
    /// pair over the fallback.
    pub impossible_cost: f64,
    /// Field names whose values form the position vector (order matters).
    pub position_fields: Vec<String>,
}

impl AssociationConfig {
    /// Create a configuration with the given cost constants and the
    /// default two-dimensional position fields.
    pub fn new(gate: f64, new_track_cost: f64, impossible_cost: f64) -> Self {
        Self {
            gate,
            new_track_cost,
            impossible_cost,
            position_fields: default_position_fields(),
        }
    }

    /// Replace the position fields used for the distance computation.
    pub fn with_position_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.position_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Check the constants for consistency.
    ///
    /// Rejects: non-finite or non-positive gate, a new-track cost below the
    /// gate (the solver could then prefer "new" over an in-gate match), an
    /// impossible sentinel that is not at least [`SENTINEL_MARGIN`] times
    /// both other constants, and an empty position-field list.
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.gate.is_finite() || self.gate <= 0.0 {
            return Err(EvalError::Configuration {
                reason: format!("gate must be finite and positive, got {}", self.gate),
            });
        }
        if !self.new_track_cost.is_finite() || self.new_track_cost < self.gate {
            return Err(EvalError::Configuration {
                reason: format!(
                    "new-track cost {} must be finite and at least the gate {}",
                    self.new_track_cost, self.gate
                ),
            });
        }
        if !self.impossible_cost.is_finite()
            || self.impossible_cost < SENTINEL_MARGIN * self.new_track_cost.max(self.gate)
        {
            return Err(EvalError::Configuration {
                reason: format!(
                    "impossible cost {} must exceed the gate and new-track cost \
                     by a factor of at least {}",
                    self.impossible_cost, SENTINEL_MARGIN
                ),
            });
        }
        if self.position_fields.is_empty() {
            return Err(EvalError::Configuration {
                reason: "position field list is empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_GATE,
            DEFAULT_NEW_TRACK_COST,
            DEFAULT_IMPOSSIBLE_COST,
        )
    }
}

fn default_position_fields() -> Vec<String> {
    vec!["X".to_string(), "Y".to_string()]
}
