use super::*;
use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use crate::tuning::{pitch_class_of, Tuning};
use crate::types::{Mapping, MovementType, PositionWindow, ProjectionEvent, ReasonCode, RegisterBand};

const CMAJ7: [u8; 4] = [48, 52, 55, 59];
const AM7: [u8; 4] = [45, 48, 52, 57];
const DM7: [u8; 4] = [50, 53, 57, 62];
const G7: [u8; 4] = [55, 59, 62, 67];

fn event(pitches: &[u8]) -> ProjectionEvent {
    ProjectionEvent::new(pitches.to_vec())
}

/// Invariants every mapping must satisfy.
fn assert_playable(mapping: &Mapping, pitches: &[u8], config: &ProjectionConfig) {
    let tuning: Tuning = config.tuning;
    let mut sorted = pitches.to_vec();
    sorted.sort_unstable();

    assert_eq!(mapping.string_set.len(), sorted.len());
    for (i, &string) in mapping.string_set.iter().enumerate() {
        assert!(
            !mapping.string_set[..i].contains(&string),
            "string {} used twice in {:?}",
            string,
            mapping.string_set
        );
        let fret = mapping.frets[string].expect("used string must have a fret");
        assert!(fret <= config.max_fret);
        assert_eq!(
            pitch_class_of(tuning.pitch(string, fret)),
            pitch_class_of(sorted[i]),
            "voice {} of {:?} on string {} fret {}",
            i,
            sorted,
            string,
            fret
        );
    }
    assert_eq!(mapping.frets.iter().flatten().count(), sorted.len());
    assert!(mapping.fret_span() <= config.max_fret_span);
    assert_eq!(mapping.anchor_fret, *mapping.used_frets().iter().min().unwrap());
    assert!(
        mapping.position_window.contains(mapping.anchor_fret),
        "anchor {} outside window {}",
        mapping.anchor_fret,
        mapping.position_window
    );
}

#[test]
fn test_first_projection_dm7() {
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    let first = engine
        .project(&event(&[50, 57, 62, 65]).with_shape("root").with_register(RegisterBand::Mid))
        .unwrap();

    assert_eq!(first.movement_type, MovementType::Reset);
    assert_eq!(first.string_set.len(), 4);
    assert_playable(&first, &[50, 57, 62, 65], &config);
    assert_eq!(first.string_set, vec![1, 2, 3, 4]);
    assert_eq!(first.frets, [None, Some(5), Some(7), Some(7), Some(6), None]);
    assert_eq!(first.position_window, PositionWindow::new(3, 12));
}

#[test]
fn test_requested_hold_repeats_previous_mapping() {
    let mut engine = FretboardProjection::default();
    let chord = event(&[50, 57, 62, 65]);
    let first = engine.project(&chord).unwrap();
    let held = engine.project(&chord.clone().with_hold(true)).unwrap();

    assert_eq!(held.movement_type, MovementType::Hold);
    assert_eq!(held.frets, first.frets);
    assert_eq!(held.string_set, first.string_set);
    assert_eq!(held.position_window, first.position_window);
    assert_eq!(held.anchor_fret, first.anchor_fret);
    assert_eq!(Mapping { movement_type: MovementType::Reset, ..held }, first);
}

#[test]
fn test_hold_ignores_new_voicing() {
    let mut engine = FretboardProjection::default();
    let first = engine.project(&event(&CMAJ7)).unwrap();
    let held = engine.project(&event(&G7).with_hold(true)).unwrap();
    assert_eq!(held.frets, first.frets);
    assert_eq!(held.movement_type, MovementType::Hold);
}

#[test]
fn test_hold_without_history_projects_normally() {
    let mut engine = FretboardProjection::default();
    let mapping = engine.project(&event(&CMAJ7).with_hold(true)).unwrap();
    assert_eq!(mapping.movement_type, MovementType::Reset);
    assert!(engine.is_tracking());
}

#[test]
fn test_repeated_chord_is_natural_hold() {
    let mut engine = FretboardProjection::default();
    let chord = event(&[50, 57, 62, 65]);
    let first = engine.project(&chord).unwrap();
    let second = engine.project(&chord).unwrap();

    assert_eq!(second.movement_type, MovementType::Hold);
    assert_eq!(second.frets, first.frets);
}

#[test]
fn test_register_reset_sequence() {
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    let low = event(&CMAJ7).with_register(RegisterBand::Low);
    let high = event(&[60, 64, 67, 71]).with_register(RegisterBand::High);

    let first = engine.project(&low).unwrap();
    let second = engine.project(&high).unwrap();
    let third = engine.project(&low).unwrap();

    assert_eq!(first.movement_type, MovementType::Reset);
    assert_eq!(second.movement_type, MovementType::Reset);
    assert_eq!(third.movement_type, MovementType::Reset);

    // Register sets: lowest strings for low, highest for high
    assert_eq!(first.string_set, vec![0, 1, 2, 3]);
    assert_eq!(second.string_set, vec![2, 3, 4, 5]);
    assert_eq!(third.string_set, vec![0, 1, 2, 3]);
    assert_playable(&second, &[60, 64, 67, 71], &config);
}

#[test]
fn test_explicit_reset_code_forces_reset() {
    let mut engine = FretboardProjection::default();
    let chord = event(&[50, 57, 62, 65]);
    engine.project(&chord).unwrap();

    let again = engine.project(&chord.clone().with_reason(ReasonCode::register_reset())).unwrap();
    assert_eq!(again.movement_type, MovementType::Reset);
}

#[test]
fn test_small_change_is_step() {
    // Dm7 -> Dm6: only one voice moves (C -> B on the G string)
    let mut engine = FretboardProjection::default();
    let first = engine.project(&event(&[50, 57, 60, 65])).unwrap();
    let second = engine.project(&event(&[50, 57, 59, 65])).unwrap();

    assert_eq!(first.string_set, second.string_set);
    assert_eq!(second.movement_type, MovementType::Step);
    assert!(second.position_window.contains(second.anchor_fret));
}

#[test]
fn test_reset_clears_continuity() {
    let mut engine = FretboardProjection::default();
    let chord = event(&[50, 57, 62, 65]);
    engine.project(&chord).unwrap();
    assert!(engine.is_tracking());

    engine.reset();
    assert!(!engine.is_tracking());
    assert!(engine.state().window().is_none());

    let after = engine.project(&chord).unwrap();
    assert_eq!(after.movement_type, MovementType::Reset);

    // A hold right after reset has nothing to repeat
    engine.reset();
    let held = engine.project(&chord.with_hold(true)).unwrap();
    assert_eq!(held.movement_type, MovementType::Reset);
}

#[test]
fn test_empty_voicing_leaves_state_alone() {
    let mut engine = FretboardProjection::default();
    let first = engine.project(&event(&CMAJ7)).unwrap();
    let history_before: Vec<u8> = engine.state().history().collect();

    let result = engine.project(&event(&[]));
    assert!(matches!(result, Err(ProjectionError::InvalidVoicing(_))));
    assert_eq!(engine.state().previous(), Some(&first));
    assert_eq!(engine.state().history().collect::<Vec<_>>(), history_before);
}

#[test]
fn test_too_many_voices_rejected() {
    let mut engine = FretboardProjection::default();
    let result = engine.project(&event(&[40, 45, 50, 55, 59, 64, 69]));
    assert!(matches!(result, Err(ProjectionError::InvalidVoicing(_))));
    assert!(!engine.is_tracking());
}

#[test]
fn test_unmappable_reports_attempts_and_keeps_state() {
    // Every string tuned to E with a 1-fret stretch: two voices a tritone apart never fit
    let config = ProjectionConfig {
        tuning: Tuning::new([40, 40, 40, 40, 40, 40]),
        max_fret_span: 1,
        ..ProjectionConfig::default()
    };
    let mut engine = FretboardProjection::new(config).unwrap();
    let result = engine.project(&event(&[40, 46]));

    match result {
        Err(ProjectionError::Unmappable { voicing, attempted }) => {
            assert_eq!(voicing, vec![40, 46]);
            assert_eq!(attempted.len(), 5);
            assert!(attempted.contains(&vec![0, 1]));
            assert!(attempted.contains(&vec![4, 5]));
        }
        other => panic!("expected Unmappable, got {:?}", other),
    }
    assert!(!engine.is_tracking());
}

#[test]
fn test_long_form_stays_in_place() {
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    let vamp = [CMAJ7, AM7, DM7, G7];

    let mut anchors = Vec::new();
    for i in 0..64 {
        let chord = vamp[i % 4];
        let mapping = engine.project(&event(&chord)).unwrap();
        assert_playable(&mapping, &chord, &config);
        anchors.push(mapping.anchor_fret);
    }

    let lo = *anchors.iter().min().unwrap();
    let hi = *anchors.iter().max().unwrap();
    assert!(hi - lo < 15, "anchors wandered from {} to {}", lo, hi);
    assert_eq!(engine.state().history().count(), 8);
}

#[test]
fn test_every_voice_count_is_playable() {
    let config = ProjectionConfig::default();
    let voicings: [&[u8]; 6] = [
        &[52],
        &[45, 52],
        &[48, 52, 55],
        &[50, 53, 57, 60],
        &[40, 47, 52, 56, 59],
        &[40, 45, 50, 55, 59, 64],
    ];
    for pitches in voicings {
        let mut engine = FretboardProjection::new(config).unwrap();
        let mapping = engine.project(&event(pitches)).unwrap();
        assert_playable(&mapping, pitches, &config);
    }
}

#[test]
fn test_shape_change_keeps_fitting_strings() {
    let mut engine = FretboardProjection::default();
    let first = engine.project(&event(&[50, 57, 62, 65]).with_shape("root")).unwrap();
    let second = engine.project(&event(&[50, 57, 60, 65]).with_shape("drop2")).unwrap();

    assert_eq!(second.string_set, first.string_set);
    assert_eq!(second.shape_id.as_str(), "drop2");
}

#[test]
fn test_alternate_tuning() {
    let config = ProjectionConfig {
        tuning: Tuning::preset("drop-d").unwrap(),
        ..ProjectionConfig::default()
    };
    let mut engine = FretboardProjection::new(config).unwrap();
    let mapping = engine.project(&event(&[38, 45, 50, 57]).with_register(RegisterBand::Low)).unwrap();
    assert_playable(&mapping, &[38, 45, 50, 57], &config);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ProjectionConfig {
        max_fret_span: 0,
        ..ProjectionConfig::default()
    };
    assert!(matches!(
        FretboardProjection::new(config),
        Err(ProjectionError::ConfigError(_))
    ));
}

#[test]
fn test_exact_placement_found_away_from_target() {
    // F#2 + F3: the only tight fingering sits at frets 11 and 6, outside the first search
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    let mapping = engine.project(&event(&[42, 53])).unwrap();

    assert_playable(&mapping, &[42, 53], &config);
    assert_eq!(mapping.string_set, vec![3, 4]);
    assert_eq!(mapping.frets, [None, None, None, Some(11), Some(6), None]);
    assert_eq!(mapping.movement_type, MovementType::Reset);
}

#[test]
fn test_relocated_placement_accepted_when_playable() {
    // E2 E3 G3 has no contiguous fingering within five frets; voices spread across strings
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    let mapping = engine.project(&event(&[40, 52, 55])).unwrap();

    assert_playable(&mapping, &[40, 52, 55], &config);
    assert_eq!(mapping.string_set, vec![4, 1, 2]);
    assert_eq!(mapping.frets, [None, Some(7), Some(5), None, Some(5), None]);
    assert_eq!(mapping.anchor_fret, 5);
    assert!(engine.is_tracking());

    // The spread string set carries on as the current strings
    let again = engine.project(&event(&[40, 52, 55])).unwrap();
    assert_eq!(again.movement_type, MovementType::Hold);
}

#[test]
fn test_drift_correction_recentres_window() {
    let config = ProjectionConfig::default();
    let mut engine = FretboardProjection::new(config).unwrap();
    for _ in 0..4 {
        let mapping = engine.project(&event(&CMAJ7)).unwrap();
        assert_eq!(mapping.anchor_fret, 0);
    }

    let far = event(&[60, 64, 67, 71])
        .with_register(RegisterBand::High)
        .with_reason(ReasonCode::register_reset());
    let mapping = engine.project(&far).unwrap();

    assert_eq!(mapping.movement_type, MovementType::Reset);
    assert_eq!(mapping.anchor_fret, 7);
    assert_playable(&mapping, &[60, 64, 67, 71], &config);
    // A plain reset would sit at [5, 14]; the window is pulled back to the recent anchors
    assert_ne!(mapping.position_window, PositionWindow::around(7, 5, 20));
    assert_eq!(mapping.position_window, PositionWindow::new(0, 7));
    assert!(mapping.position_window.contains(mapping.anchor_fret));
    assert_eq!(engine.state().history().collect::<Vec<_>>(), vec![0, 0, 0, 0, 7]);
}
