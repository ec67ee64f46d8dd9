//! Game scenarios driven through the public intent API

use srs_tetris::core::{Board, ConfigError, GameState, RulesConfig};
use srs_tetris::types::{Cell, GameAction, Phase, PieceKind, RotateDirection};

#[test]
fn test_game_lifecycle() {
    let game = GameState::new(12345);
    assert_eq!(game.phase(), Phase::Active);
    assert!(game.active().is_some());
    assert!(game.hold_piece().is_none());
    assert!(game.can_hold());
}

#[test]
fn test_game_actions() {
    let mut game = GameState::new(12345);
    let start = game.active().unwrap();

    assert!(game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.active().unwrap().x, start.x - 1);
    assert!(game.apply_action(GameAction::MoveRight));
    assert_eq!(game.active().unwrap().x, start.x);

    assert!(game.apply_action(GameAction::SoftDrop));
    assert_eq!(game.active().unwrap().y, start.y + 1);
    assert_eq!(game.score(), 1);
}

#[test]
fn test_wall_stops_movement() {
    let mut game = GameState::new(3);
    let mut moves = 0;
    while game.move_left() {
        moves += 1;
        assert!(moves < 10, "piece walked through the wall");
    }
    let piece = game.active().unwrap();
    assert!(piece.cells().iter().any(|&(x, _)| x == 0));
}

#[test]
fn test_tetris_through_intents() {
    let mut board = Board::default();
    for y in 18..22 {
        board.fill_row(y, PieceKind::J, &[0]);
    }
    let mut game = GameState::from_board(RulesConfig::default(), 2024, board).unwrap();

    // The first bag always contains an I; park everything else on the right.
    for _ in 0..7 {
        let kind = game.active().unwrap().kind;
        if kind == PieceKind::I {
            break;
        }
        for _ in 0..3 {
            game.move_right();
        }
        assert!(game.hard_drop());
        assert_eq!(game.lines(), 0);
    }

    assert_eq!(game.active().unwrap().kind, PieceKind::I);
    assert!(game.rotate(RotateDirection::Clockwise));
    while game.move_left() {}
    assert_eq!(game.active().unwrap().x, 0);

    let score_before = game.score();
    assert!(game.hard_drop());

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 4);
    assert!(!event.tspin);
    assert_eq!(event.points, 800 + 4);
    assert_eq!(game.score(), score_before + 804);
    assert_eq!(game.lines(), 4);
    assert!(game.back_to_back());
    assert_eq!(game.combo(), 0);
}

#[test]
fn test_hold_swaps_without_drawing() {
    let mut game = GameState::new(42);
    let first = game.active().unwrap().kind;

    assert!(game.apply_action(GameAction::Hold));
    assert!(!game.apply_action(GameAction::Hold));
    assert_eq!(game.hold_piece(), Some(first));

    assert!(game.apply_action(GameAction::HardDrop));

    let queue = game.next_queue().to_vec();
    let pending = game.bag().pending().to_vec();
    let current = game.active().unwrap().kind;

    assert!(game.apply_action(GameAction::Hold));
    assert_eq!(game.active().unwrap().kind, first);
    assert_eq!(game.hold_piece(), Some(current));
    assert_eq!(game.next_queue(), queue.as_slice());
    assert_eq!(game.bag().pending(), pending.as_slice());
}

#[test]
fn test_game_over_on_blocked_spawn() {
    let mut board = Board::default();
    board.set(4, 0, Cell::Occupied(PieceKind::Z));
    let mut game = GameState::from_board(RulesConfig::default(), 1, board).unwrap();

    assert!(game.is_game_over());
    assert!(game.active().is_none());
    let snap = game.snapshot();
    assert!(snap.is_game_over());

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::SonicDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Rotate180,
        GameAction::Hold,
        GameAction::Pause,
    ] {
        assert!(!game.apply_action(action), "{action:?}");
    }
    assert!(!game.tick());
    assert_eq!(game.snapshot(), snap);
}

#[test]
fn test_topping_out_by_stacking() {
    let mut game = GameState::new(7);
    let mut drops = 0;
    while !game.is_game_over() {
        assert!(game.hard_drop());
        drops += 1;
        assert!(drops < 100, "stack never reached the top");
    }
    assert!(game.active().is_none());
    assert!(!game.hard_drop());
}

#[test]
fn test_pause_resume() {
    let mut game = GameState::new(1);
    assert!(game.pause());
    assert_eq!(game.snapshot().phase, Phase::Paused);
    assert!(!game.hard_drop());
    assert!(game.toggle_pause());
    assert!(game.hard_drop());
}

#[test]
fn test_with_config_rejects_invalid_rules() {
    let rules = RulesConfig {
        gravity_frames: Vec::new(),
        ..RulesConfig::default()
    };
    assert!(matches!(
        GameState::with_config(rules, 1),
        Err(ConfigError::EmptyGravityTable)
    ));

    let err = GameState::from_board(RulesConfig::default(), 1, Board::new(10, 20)).unwrap_err();
    assert!(matches!(err, ConfigError::BoardMismatch { .. }));
}

#[test]
fn test_custom_board_and_spawn() {
    let mut rules = RulesConfig::default();
    rules.board.cols = 8;
    rules.board.rows = 16;
    rules.board.visible_rows = 14;
    rules.spawn.x = 3;
    let game = GameState::with_config(rules, 9).unwrap();

    let piece = game.active().unwrap();
    assert_eq!((piece.x, piece.y), (3, 0));
    assert_eq!(game.ghost_y(), Some(15));

    let snap = game.snapshot();
    assert_eq!(snap.board.len(), 8 * 14);
    assert_eq!(snap.hidden_rows, 2);
}
