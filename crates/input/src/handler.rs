//! DAS/ARR input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! An ARR of 0 means "instant": horizontal repeats jump to the wall and soft
//! drop becomes a sonic drop.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, BOARD_WIDTH, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS};

/// Actions produced by one update; repeats beyond this are dropped.
///
/// Covers a full-width slide on the widest accepted board.
pub const MAX_ACTIONS_PER_UPDATE: usize = 128;

/// Caller-owned repeat timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputTiming {
    /// Delay before a held horizontal key starts repeating.
    pub das_ms: u32,
    /// Interval between horizontal repeats; 0 slides to the wall.
    pub arr_ms: u32,
    /// Interval between soft drop repeats; 0 drops to contact.
    pub soft_drop_arr_ms: u32,
}

impl Default for InputTiming {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_arr_ms: SOFT_DROP_ARR_MS,
        }
    }
}

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    timing: InputTiming,
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_das_timer: u32,
    horizontal_arr_accumulator: u32,
    down_arr_accumulator: u32,
    key_release_timeout_ms: u32,
    /// Moves pushed by a zero-ARR slide.
    board_cols: u8,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_timing(InputTiming::default())
    }

    pub fn with_timing(timing: InputTiming) -> Self {
        Self {
            timing,
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_das_timer: 0,
            horizontal_arr_accumulator: 0,
            down_arr_accumulator: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            board_cols: BOARD_WIDTH,
        }
    }

    /// Board width the zero-ARR slide has to cover.
    pub fn with_board_cols(mut self, cols: u8) -> Self {
        self.board_cols = cols;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn timing(&self) -> InputTiming {
        self.timing
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// The soft drop intent for the configured repeat rate
    fn soft_drop_action(&self) -> GameAction {
        if self.timing.soft_drop_arr_ms == 0 {
            GameAction::SonicDrop
        } else {
            GameAction::SoftDrop
        }
    }

    /// Handle a key press. Returns the immediate action for a newly held key.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => HorizontalDirection::Left,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => HorizontalDirection::Right,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.last_key_time = Instant::now();
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_arr_accumulator = 0;
                return Some(self.soft_drop_action());
            }
            _ => return None,
        };

        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
        direction.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
                if self.horizontal == HorizontalDirection::Left {
                    self.release_horizontal();
                }
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
                if self.horizontal == HorizontalDirection::Right {
                    self.release_horizontal();
                }
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.release_down();
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_arr_accumulator = 0;
    }

    /// Advance repeat timers by `elapsed_ms` and return the repeats that fired.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_ACTIONS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        if let Some(action) = self.horizontal.action() {
            let das = self.timing.das_ms;
            let prev_das = self.horizontal_das_timer;
            self.horizontal_das_timer = self.horizontal_das_timer.saturating_add(elapsed_ms);

            if self.horizontal_das_timer >= das {
                if self.timing.arr_ms == 0 {
                    // Slide to the wall; moves past it are rejected by the engine.
                    for _ in 0..self.board_cols {
                        let _ = actions.try_push(action);
                    }
                } else {
                    let excess = if prev_das < das {
                        self.horizontal_das_timer - das
                    } else {
                        elapsed_ms
                    };
                    self.horizontal_arr_accumulator += excess;

                    while self.horizontal_arr_accumulator >= self.timing.arr_ms {
                        let _ = actions.try_push(action);
                        self.horizontal_arr_accumulator -= self.timing.arr_ms;
                    }
                }
            }
        }

        if self.down_held {
            if self.timing.soft_drop_arr_ms == 0 {
                let _ = actions.try_push(GameAction::SonicDrop);
            } else {
                self.down_arr_accumulator += elapsed_ms;
                while self.down_arr_accumulator >= self.timing.soft_drop_arr_ms {
                    let _ = actions.try_push(GameAction::SoftDrop);
                    self.down_arr_accumulator -= self.timing.soft_drop_arr_ms;
                }
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
