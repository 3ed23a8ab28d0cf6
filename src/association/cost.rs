//! Gated cost matrix construction
//!
//! The matrix built here is the input to the assignment solver: truth rows
//! on top, then one synthetic row per track column encoding the cost of
//! declaring that track new/unassociated. Pairs that fail the gate carry
//! the impossible sentinel; the synthetic diagonal guarantees every column
//! one affordable entry, so the solver always has a feasible complete
//! assignment over the track columns.

use nalgebra::DMatrix;

use crate::association::snapshot::Snapshot;
use crate::config::AssociationConfig;

/// Build the `(num_truth + num_track) × num_track` association cost matrix
/// for one timestamp.
///
/// Rows `0..num_truth` hold pairwise Euclidean distances where the pair is
/// inside the gate (strictly), the impossible sentinel otherwise. Row
/// `num_truth + j` holds the new-track cost in column `j` and the sentinel
/// elsewhere. With zero truths the matrix degenerates to the synthetic
/// block and every track is trivially new.
pub fn build_cost_matrix(
    truths: &Snapshot,
    tracks: &Snapshot,
    config: &AssociationConfig,
) -> DMatrix<f64> {
    let num_truth = truths.len();
    let num_track = tracks.len();

    let mut cost =
        DMatrix::from_element(num_truth + num_track, num_track, config.impossible_cost);

    for i in 0..num_truth {
        for j in 0..num_track {
            let distance = (truths.position(i) - tracks.position(j)).norm();
            if distance < config.gate {
                cost[(i, j)] = distance;
            }
        }
    }

    for j in 0..num_track {
        cost[(num_truth + j, j)] = config.new_track_cost;
    }

    cost
}

/// Whether any truth row of `col` passes the gate.
///
/// This is the "associated" test: it looks only at truth rows, so the
/// synthetic block never makes a track count as associated.
pub fn column_has_candidate(
    cost: &DMatrix<f64>,
    num_truth: usize,
    col: usize,
    impossible_cost: f64,
) -> bool {
    (0..num_truth).any(|row| cost[(row, col)] < impossible_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesStore;

    fn snapshots(truth_table: &str, track_table: &str) -> (Snapshot, Snapshot) {
        let fields = vec!["X".to_string(), "Y".to_string()];
        let truths = SeriesStore::parse_table(truth_table).unwrap();
        let tracks = SeriesStore::parse_table(track_table).unwrap();
        (
            Snapshot::at(&truths, 0.0, &fields).unwrap(),
            Snapshot::at(&tracks, 0.0, &fields).unwrap(),
        )
    }

    #[test]
    fn test_shape_and_synthetic_diagonal() {
        let (truths, tracks) = snapshots(
            "T ID X Y\n0.0 1 0.0 0.0\n",
            "T ID X Y\n0.0 1 0.5 0.0\n0.0 2 9.0 9.0\n",
        );
        let config = AssociationConfig::default();
        let cost = build_cost_matrix(&truths, &tracks, &config);

        assert_eq!(cost.shape(), (3, 2));
        // In-gate pair carries its distance.
        assert!((cost[(0, 0)] - 0.5).abs() < 1e-12);
        // Out-of-gate pair carries the sentinel.
        assert_eq!(cost[(0, 1)], config.impossible_cost);
        // Synthetic diagonal, sentinel off-diagonal.
        assert_eq!(cost[(1, 0)], config.new_track_cost);
        assert_eq!(cost[(1, 1)], config.impossible_cost);
        assert_eq!(cost[(2, 0)], config.impossible_cost);
        assert_eq!(cost[(2, 1)], config.new_track_cost);
    }

    #[test]
    fn test_distance_equal_to_gate_fails() {
        let (truths, tracks) =
            snapshots("T ID X Y\n0.0 1 0.0 0.0\n", "T ID X Y\n0.0 1 2.0 0.0\n");
        let config = AssociationConfig::default();
        let cost = build_cost_matrix(&truths, &tracks, &config);
        assert_eq!(cost[(0, 0)], config.impossible_cost);
    }

    #[test]
    fn test_zero_truths_degenerates_to_synthetic_block() {
        let fields = vec!["X".to_string(), "Y".to_string()];
        let empty = SeriesStore::parse_table("T ID X Y\n").unwrap();
        let tracks = SeriesStore::parse_table("T ID X Y\n0.0 1 0.0 0.0\n0.0 2 1.0 1.0\n").unwrap();
        let truths = Snapshot::at(&empty, 0.0, &fields).unwrap();
        let tracks = Snapshot::at(&tracks, 0.0, &fields).unwrap();

        let config = AssociationConfig::default();
        let cost = build_cost_matrix(&truths, &tracks, &config);
        assert_eq!(cost.shape(), (2, 2));
        assert_eq!(cost[(0, 0)], config.new_track_cost);
        assert_eq!(cost[(1, 1)], config.new_track_cost);
    }

    #[test]
    fn test_every_column_has_finite_fallback() {
        let (truths, tracks) = snapshots(
            "T ID X Y\n0.0 1 0.0 0.0\n0.0 2 50.0 50.0\n",
            "T ID X Y\n0.0 1 100.0 0.0\n0.0 2 0.1 0.0\n0.0 3 -30.0 4.0\n",
        );
        let config = AssociationConfig::default();
        let cost = build_cost_matrix(&truths, &tracks, &config);

        for col in 0..cost.ncols() {
            let affordable = (0..cost.nrows()).any(|row| cost[(row, col)] < config.impossible_cost);
            assert!(affordable, "column {} has no affordable entry", col);
        }
    }

    #[test]
    fn test_column_candidate_ignores_synthetic_rows() {
        let (truths, tracks) =
            snapshots("T ID X Y\n0.0 1 0.0 0.0\n", "T ID X Y\n0.0 1 50.0 0.0\n");
        let config = AssociationConfig::default();
        let cost = build_cost_matrix(&truths, &tracks, &config);

        // The synthetic row is affordable, but no truth row passes the gate.
        assert!(!column_has_candidate(
            &cost,
            truths.len(),
            0,
            config.impossible_cost
        ));
    }
}
