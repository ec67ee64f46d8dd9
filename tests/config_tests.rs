//! Ruleset loading

use srs_tetris::core::{ConfigError, GameState, LockResetPolicy, RulesConfig};
use srs_tetris::types::{PieceKind, RotateDirection};

#[test]
fn default_ruleset_round_trips_through_json() {
    let json = RulesConfig::default().to_json_string().unwrap();
    let parsed = RulesConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, RulesConfig::default());
}

#[test]
fn json_file_overrides_selected_fields() {
    let path = std::env::temp_dir().join(format!("srs-rules-{}.json", std::process::id()));
    let json = serde_json::json!({
        "lock_delay": 15,
        "lock_reset": "reset_on_any_move",
        "preview_depth": 3,
        "gravity_frames": [30, 20, 10],
        "kicks": { "half_turn": [[0, 0], [1, 0]] }
    });
    std::fs::write(&path, json.to_string()).unwrap();

    let rules = RulesConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(rules.lock_delay, 15);
    assert_eq!(rules.lock_reset, LockResetPolicy::ResetOnAnyMove);
    assert_eq!(rules.preview_depth, 3);
    assert_eq!(rules.gravity_frames, vec![30, 20, 10]);
    assert_eq!(rules.kicks.half_turn, Some(vec![(0, 0), (1, 0)]));
    assert_eq!(rules.board, RulesConfig::default().board);

    let game = GameState::with_config(rules, 1).unwrap();
    assert_eq!(game.next_queue().len(), 3);
    assert_eq!(game.gravity_frames(), 30);
}

#[test]
fn invalid_json_values_are_rejected() {
    let err = RulesConfig::from_json_str(r#"{ "preview_depth": 12 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::PreviewDepth { depth: 12, .. }));

    let err = RulesConfig::from_json_str(r#"{ "spawn": { "x": -1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::SpawnOutOfBounds { .. }));

    let err = RulesConfig::from_json_str(r#"{ "lock_reset": "sometimes" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn oversized_or_shifted_kicks_are_rejected() {
    let err = RulesConfig::from_json_str(r#"{ "kicks": { "half_turn": [[127, 0]] } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Kicks { table: "half_turn", row: 0 }));

    let err = RulesConfig::from_json_str(r#"{ "kicks": { "half_turn": [[0, 0], [0, -9]] } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Kicks { table: "half_turn", .. }));
    assert!(err.to_string().contains("half_turn"));

    let rules = RulesConfig::from_json_str(r#"{ "kicks": { "half_turn": [[0, 0], [0, -4]] } }"#)
        .unwrap();
    let mut game = GameState::with_config(rules, 1).unwrap();
    if game.active().unwrap().kind == PieceKind::O {
        assert!(game.hold());
    }
    assert!(game.rotate(RotateDirection::Half));
}

#[test]
fn missing_file_is_io_error() {
    let err = RulesConfig::from_json_file("/nonexistent/srs-rules.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(std::error::Error::source(&err).is_some());
}
