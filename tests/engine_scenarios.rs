//! End-to-end scenarios for the association engine
//!
//! Each scenario builds small track/truth tables, runs a full evaluation,
//! and checks the per-timestep record, the assignment histories, and the
//! aggregate metrics against hand-computed expectations.

use siap_eval_rs::{AssociationConfig, AssociationEngine, EvalError, SeriesStore};

fn store(table: &str) -> SeriesStore {
    SeriesStore::parse_table(table).unwrap()
}

fn run(tracks: &str, truths: &str) -> AssociationEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine =
        AssociationEngine::new(store(tracks), store(truths), AssociationConfig::default())
            .unwrap();
    engine.associate().unwrap();
    engine
}

/// One truth and one track with identical positions at all three shared
/// timestamps: every step assigns the track to the truth.
#[test]
fn scenario_coincident_pair() {
    let tracks = "T ID X Y\n0.0 1 0.0 0.0\n1.0 1 1.0 0.0\n2.0 1 2.0 0.0\n";
    let truths = "T ID X Y\n0.0 5 0.0 0.0\n1.0 5 1.0 0.0\n2.0 5 2.0 0.0\n";
    let engine = run(tracks, truths);

    assert_eq!(engine.axis(), &[0.0, 1.0, 2.0]);
    for record in engine.time_data() {
        assert_eq!(record.num_assigned, 1);
        assert_eq!(record.num_associated, 1);
        assert_eq!(record.truth_track_assignment, vec![Some(1)]);
        assert_eq!(record.track_truth_assignment, vec![Some(5)]);
    }

    let truth_history = &engine.truth_assignments()[&5];
    assert_eq!(truth_history.times(), &[0.0, 1.0, 2.0]);
    assert_eq!(truth_history.counterparts(), &[Some(1), Some(1), Some(1)]);
    assert_eq!(truth_history.most_frequent_counterpart(), Some(1));

    let summary = engine.metrics();
    assert_eq!(summary.completeness.overall, Some(1.0));
    assert_eq!(summary.false_track_ratio.overall, Some(0.0));
    assert_eq!(summary.ambiguity.overall, Some(1.0));
}

/// One truth and one track always 5.0 apart with gate 2.0: the track falls
/// to its synthetic row at every step and the truth is never assigned.
#[test]
fn scenario_out_of_gate_pair() {
    let tracks = "T ID X Y\n0.0 1 0.0 0.0\n1.0 1 0.0 0.0\n2.0 1 0.0 0.0\n";
    let truths = "T ID X Y\n0.0 5 5.0 0.0\n1.0 5 5.0 0.0\n2.0 5 5.0 0.0\n";
    let engine = run(tracks, truths);

    for record in engine.time_data() {
        assert_eq!(record.num_assigned, 0);
        assert_eq!(record.num_associated, 0);
        assert_eq!(record.truth_track_assignment, vec![None]);
        assert_eq!(record.track_truth_assignment, vec![None]);
    }

    let truth_history = &engine.truth_assignments()[&5];
    assert_eq!(truth_history.counterparts(), &[None, None, None]);
    assert_eq!(truth_history.most_frequent_counterpart(), None);

    let summary = engine.metrics();
    assert_eq!(summary.completeness.overall, Some(0.0));
    assert_eq!(summary.false_track_ratio.overall, Some(1.0));
    // No track was ever associated, so ambiguity is undefined.
    assert_eq!(summary.ambiguity.overall, None);
}

/// Two tracks inside the gate of a single truth: the closer one wins the
/// truth row, the other falls to its synthetic row. Both count as
/// associated, one as assigned.
#[test]
fn scenario_track_dual() {
    let tracks = "T ID X Y\n0.0 1 0.5 0.0\n0.0 2 1.0 0.0\n";
    let truths = "T ID X Y\n0.0 5 0.0 0.0\n";
    let engine = run(tracks, truths);

    let record = &engine.time_data()[0];
    assert_eq!(record.num_associated, 2);
    assert_eq!(record.num_assigned, 1);
    assert_eq!(record.truth_track_assignment, vec![Some(1)]);
    assert_eq!(record.track_truth_assignment, vec![Some(5), None]);

    let summary = engine.metrics();
    assert_eq!(summary.ambiguity.overall, Some(0.5));
    assert_eq!(summary.completeness.overall, Some(1.0));
    assert_eq!(summary.false_track_ratio.overall, Some(0.0));
}

/// A truth whose span ends before the track axis does is excluded from the
/// later snapshots and contributes nothing to the counts there.
#[test]
fn scenario_truth_leaves_axis() {
    let tracks = "T ID X Y\n0.0 1 0.0 0.0\n1.0 1 1.0 0.0\n2.0 1 2.0 0.0\n";
    let truths = "T ID X Y\n0.0 5 0.0 0.0\n1.0 5 1.0 0.0\n";
    let engine = run(tracks, truths);

    let time_data = engine.time_data();
    assert_eq!(time_data[0].num_valid_truths(), 1);
    assert_eq!(time_data[1].num_valid_truths(), 1);
    assert_eq!(time_data[2].num_valid_truths(), 0);
    assert_eq!(time_data[2].num_assigned, 0);

    // History only covers the timestamps where the truth was valid.
    let truth_history = &engine.truth_assignments()[&5];
    assert_eq!(truth_history.times(), &[0.0, 1.0]);

    let summary = engine.metrics();
    // Defined at the first two steps, undefined at the last.
    assert_eq!(summary.completeness.values[1], Some(1.0));
    assert_eq!(summary.completeness.values[2], None);
    assert_eq!(summary.completeness.overall, Some(1.0));
}

/// Truth is resampled onto the track axis, so a truth sampled at other
/// times still associates where its interpolated position is in gate.
#[test]
fn scenario_truth_resampled_onto_axis() {
    let tracks = "T ID X Y\n1.0 1 10.0 0.0\n";
    // Truth sampled at 0.0 and 2.0; at t=1.0 it interpolates to (10, 0).
    let truths = "T ID X Y\n0.0 5 0.0 0.0\n2.0 5 20.0 0.0\n";
    let engine = run(tracks, truths);

    let record = &engine.time_data()[0];
    assert_eq!(record.num_assigned, 1);
    assert_eq!(record.truth_track_assignment, vec![Some(1)]);
}

/// Heartbeat rows extend the track time axis without becoming tracks.
#[test]
fn scenario_heartbeat_extends_axis() {
    let tracks = "T ID X Y\n0.0 1 0.0 0.0\n1.0 -1 0.0 0.0\n";
    let truths = "T ID X Y\n0.0 5 0.0 0.0\n1.0 5 0.0 0.0\n";
    let engine = run(tracks, truths);

    assert_eq!(engine.axis(), &[0.0, 1.0]);
    let time_data = engine.time_data();
    // At the heartbeat-only timestamp there is no valid track, but the
    // truth is still valid and simply goes unassigned.
    assert_eq!(time_data[1].num_valid_tracks(), 0);
    assert_eq!(time_data[1].num_valid_truths(), 1);
    assert_eq!(time_data[1].num_assigned, 0);
    assert_eq!(engine.truth_assignments()[&5].counterparts(), &[Some(1), None]);
}

/// Duplicate records abort the run before any history is produced.
#[test]
fn scenario_duplicate_records_abort() {
    let good_tracks = "T ID X Y\n0.0 1 0.0 0.0\n";
    let good_truths = "T ID X Y\n0.0 5 0.0 0.0\n";
    let dup = "T ID X Y\n0.0 7 0.0 0.0\n0.0 7 1.0 1.0\n";

    let err = AssociationEngine::new(store(dup), store(good_truths), AssociationConfig::default())
        .unwrap_err();
    assert!(matches!(err, EvalError::DuplicateTimestamp { id: 7, time } if time == 0.0));

    // Truth-side duplicates are caught too, before resampling collapses them.
    let err = AssociationEngine::new(store(good_tracks), store(dup), AssociationConfig::default())
        .unwrap_err();
    assert!(matches!(err, EvalError::DuplicateTimestamp { id: 7, .. }));
}

/// Identical inputs and configuration reproduce identical histories and
/// metrics.
#[test]
fn scenario_deterministic_rerun() {
    let tracks = "T ID X Y\n\
        0.0 1 0.1 0.0\n0.0 2 0.6 0.0\n0.0 3 40.0 40.0\n\
        1.0 1 1.1 0.0\n1.0 2 1.4 0.0\n1.0 3 41.0 41.0\n";
    let truths = "T ID X Y\n\
        0.0 5 0.0 0.0\n0.0 6 41.0 40.0\n\
        1.0 5 1.0 0.0\n1.0 6 41.0 41.0\n";

    let first = run(tracks, truths);
    let second = run(tracks, truths);

    assert_eq!(first.time_data(), second.time_data());
    assert_eq!(first.truth_assignments(), second.truth_assignments());
    assert_eq!(first.track_assignments(), second.track_assignments());
    assert_eq!(first.metrics(), second.metrics());
}

/// Count and range invariants over a mixed scenario with duals, misses,
/// and truths entering and leaving the axis.
#[test]
fn scenario_count_invariants() {
    let tracks = "T ID X Y\n\
        0.0 1 0.2 0.0\n0.0 2 0.7 0.0\n0.0 3 90.0 90.0\n\
        1.0 1 1.2 0.0\n1.0 3 91.0 91.0\n\
        2.0 1 2.2 0.0\n2.0 2 2.7 0.0\n";
    let truths = "T ID X Y\n\
        0.0 5 0.0 0.0\n\
        1.0 5 1.0 0.0\n1.0 6 50.0 50.0\n\
        2.0 5 2.0 0.0\n2.0 6 50.0 50.0\n";
    let engine = run(tracks, truths);

    for record in engine.time_data() {
        assert!(record.num_associated <= record.num_valid_tracks());
        assert!(
            record.num_assigned <= record.num_valid_truths().min(record.num_valid_tracks())
        );
    }

    let summary = engine.metrics();
    for series in [
        &summary.completeness,
        &summary.false_track_ratio,
        &summary.ambiguity,
    ] {
        for value in series.values.iter().chain([&series.overall]).flatten() {
            assert!((0.0..=1.0).contains(value), "ratio {} out of range", value);
        }
    }
}
