//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateCcw),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::Rotate180),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should start a new game. The engine has no restart intent;
/// the front end builds a fresh one.
pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
