//! Game state module - the rules engine
//!
//! Ties together board, pieces, bag and scoring. The caller drives it with
//! discrete intents and gravity ticks; every intent returns whether it took
//! effect, and a rejected intent leaves the state untouched.
//!
//! Time is counted in frames and gravity ticks only. `advance_frame` turns
//! frames into ticks using the level's gravity table entry; `tick` is one
//! gravity step.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::{ConfigError, LockResetPolicy, RulesConfig};
use crate::piece::Piece;
use crate::pieces::{try_rotate, PieceShape};
use crate::rng::Bag;
use crate::scoring::{
    calculate_level, calculate_score, gravity_frames_for, hard_drop_bonus, ScoreResult,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    GameAction, LockEvent, Phase, PieceKind, RotateDirection, MAX_PREVIEW_DEPTH,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: RulesConfig,
    board: Board,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    /// Set by a hold, cleared by the next successful lock.
    hold_used: bool,
    next_queue: ArrayVec<PieceKind, MAX_PREVIEW_DEPTH>,
    bag: Bag,
    /// Last lock event (consumed by the front end).
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    level: u32,
    /// -1 means no chain; the first clearing lock makes it 0.
    combo: i32,
    back_to_back: bool,
    /// Frames per cell at the current level.
    gravity_frames: u32,
    gravity_timer: u32,
    /// Grounded gravity ticks so far for the active piece.
    lock_delay: u32,
    phase: Phase,
}

impl GameState {
    /// Create a new game with the standard ruleset and the given bag seed
    pub fn new(seed: u64) -> Self {
        let config = RulesConfig::default();
        let board = Board::new(config.board.cols, config.board.rows);
        Self::build(config, seed, board)
    }

    /// Create a new game with a custom ruleset
    pub fn with_config(config: RulesConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board.cols, config.board.rows);
        Ok(Self::build(config, seed, board))
    }

    /// Start from a prepared board.
    ///
    /// The first piece spawns with the normal check, so a board that blocks
    /// the spawn pose starts in `GameOver`.
    pub fn from_board(config: RulesConfig, seed: u64, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        config.check_board(&board)?;
        Ok(Self::build(config, seed, board))
    }

    fn build(config: RulesConfig, seed: u64, board: Board) -> Self {
        let mut bag = Bag::new(seed);
        let next_queue = (0..config.preview_depth).map(|_| bag.draw()).collect();
        let gravity_frames = gravity_frames_for(&config.gravity_frames, 0);

        let mut game = Self {
            config,
            board,
            active: None,
            hold: None,
            hold_used: false,
            next_queue,
            bag,
            last_event: None,
            score: 0,
            lines: 0,
            level: 0,
            combo: -1,
            back_to_back: false,
            gravity_frames,
            gravity_timer: 0,
            lock_delay: 0,
            phase: Phase::Active,
        };
        game.spawn_next();
        game
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next_queue
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Frames per gravity cell at the current level
    pub fn gravity_frames(&self) -> u32 {
        self.gravity_frames
    }

    pub fn gravity_timer(&self) -> u32 {
        self.gravity_timer
    }

    pub fn lock_delay(&self) -> u32 {
        self.lock_delay
    }

    /// Take the last lock event, leaving `None` behind.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// The active piece, only while gameplay intents are accepted.
    fn playing(&self) -> Option<Piece> {
        if self.phase != Phase::Active {
            return None;
        }
        self.active
    }

    fn fits(&self, piece: &Piece) -> bool {
        !self.board.collides(&piece.cells())
    }

    /// Successful movement of the active piece
    fn on_moved(&mut self) {
        if self.config.lock_reset == LockResetPolicy::ResetOnAnyMove {
            self.lock_delay = 0;
        }
    }

    /// Move one column in the direction of `dx`.
    ///
    /// Only the sign counts; 0 is rejected.
    pub fn try_move(&mut self, dx: i8) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };
        let dx = dx.signum();
        if dx == 0 {
            return false;
        }
        let moved = piece.shifted(dx, 0);
        if !self.fits(&moved) {
            return false;
        }
        self.active = Some(moved);
        self.on_moved();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate with SRS wall kicks; the first free candidate wins.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };
        let board = &self.board;
        let Some(rotated) = try_rotate(
            piece.kind,
            piece.rotation,
            piece.x,
            piece.y,
            direction,
            &self.config.kicks,
            |cells| board.collides(cells),
        ) else {
            return false;
        };

        self.active = Some(Piece {
            rotation: rotated.rotation,
            x: rotated.x,
            y: rotated.y,
            ..piece
        });
        self.on_moved();
        true
    }

    /// Move down one row for one point. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };
        let dropped = piece.shifted(0, 1);
        if !self.fits(&dropped) {
            return false;
        }
        self.active = Some(dropped);
        self.score = self.score.saturating_add(1);
        self.on_moved();
        true
    }

    /// Soft drop until contact without locking; returns rows descended.
    pub fn sonic_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.soft_drop() {
            rows += 1;
        }
        rows
    }

    /// Drop to contact and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };
        let landing_y = self.landing_y(&piece);
        self.active = Some(Piece {
            y: landing_y,
            ..piece
        });
        self.lock_active(true);
        true
    }

    /// Hold current piece (once per piece)
    ///
    /// With an empty slot the next queue advances; otherwise the held kind
    /// comes back at the spawn pose without touching the queue or the bag.
    pub fn hold(&mut self) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };
        if self.hold_used {
            return false;
        }

        match self.hold.replace(piece.kind) {
            None => self.spawn_next(),
            Some(held) => self.spawn(held),
        };
        self.hold_used = true;
        self.lock_delay = 0;
        self.gravity_timer = 0;
        true
    }

    /// One gravity step. Returns whether the piece locked.
    pub fn tick(&mut self) -> bool {
        let Some(piece) = self.playing() else {
            return false;
        };

        let fallen = piece.shifted(0, 1);
        if self.fits(&fallen) {
            self.active = Some(fallen);
            self.lock_delay = 0;
            return false;
        }

        self.lock_delay += 1;
        if self.lock_delay >= self.config.lock_delay {
            self.lock_active(false);
            return true;
        }
        false
    }

    /// Advance one frame, running a gravity tick when the level's
    /// frames-per-cell count is reached. Returns whether the piece locked.
    pub fn advance_frame(&mut self) -> bool {
        if self.playing().is_none() {
            return false;
        }
        self.gravity_timer += 1;
        if self.gravity_timer < self.gravity_frames {
            return false;
        }
        self.gravity_timer = 0;
        self.tick()
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Active;
        true
    }

    /// Toggle pause state. Game over stays game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Active => self.pause(),
            Phase::Paused => self.resume(),
            Phase::GameOver => false,
        }
    }

    /// Apply a game action
    /// Returns true if the action was successful
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::SonicDrop => self.sonic_drop() > 0,
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Rotate180 => self.rotate(RotateDirection::Half),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
        }
    }

    /// Lowest pivot row `piece` can reach by falling straight down
    fn landing_y(&self, piece: &Piece) -> i8 {
        let mut landed = *piece;
        loop {
            let next = landed.shifted(0, 1);
            if !self.fits(&next) {
                return landed.y;
            }
            landed = next;
        }
    }

    /// Pivot row of the ghost piece
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(self.landing_y(&active))
    }

    /// Cells of the ghost piece
    pub fn ghost_cells(&self) -> Option<PieceShape> {
        let active = self.active?;
        let y = self.ghost_y()?;
        Some(active.cells_at(active.rotation, active.x, y))
    }

    /// Three of the four diagonal corners around the T pivot are blocked.
    fn is_tspin(&self, piece: &Piece) -> bool {
        if piece.kind != PieceKind::T {
            return false;
        }
        let corners = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
        let blocked = corners
            .iter()
            .filter(|&&(dx, dy)| self.board.is_blocked(piece.x + dx, piece.y + dy))
            .count();
        blocked >= 3
    }

    /// Write the active piece into the board and run the post-lock rules.
    fn lock_active(&mut self, hard_drop: bool) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if !self.board.lock(&piece) {
            self.phase = Phase::GameOver;
            self.last_event = Some(LockEvent {
                kind: piece.kind,
                lines_cleared: 0,
                tspin: false,
                points: 0,
                combo: self.combo,
                back_to_back: self.back_to_back,
                hard_drop,
                topped_out: true,
            });
            return;
        }

        // Corners are read before rows collapse.
        let tspin = self.is_tspin(&piece);
        let cleared = self.board.clear_lines();

        let result = if cleared > 0 || tspin {
            calculate_score(cleared, tspin, self.back_to_back)
        } else {
            ScoreResult::default()
        };
        let mut points = result.total;
        if hard_drop {
            points = points.saturating_add(hard_drop_bonus(self.board.height(), piece.y));
        }
        self.score = self.score.saturating_add(points);

        self.lines += cleared as u32;
        self.level = calculate_level(self.lines);
        self.gravity_frames = gravity_frames_for(&self.config.gravity_frames, self.level);

        if cleared > 0 {
            self.combo += 1;
            self.back_to_back = result.difficult;
        } else {
            self.combo = -1;
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared as u32,
            tspin,
            points,
            combo: self.combo,
            back_to_back: self.back_to_back,
            hard_drop,
            topped_out: false,
        });

        self.hold_used = false;
        self.lock_delay = 0;
        self.spawn_next();
    }

    /// Advance the next queue and spawn its front.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next_queue.pop_at(0) {
            Some(kind) => {
                self.next_queue.push(self.bag.draw());
                kind
            }
            // Zero preview depth
            None => self.bag.draw(),
        };
        self.spawn(kind)
    }

    /// Place `kind` at the spawn pose; a blocked spawn ends the game.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::new(kind, self.config.spawn.x, self.config.spawn.y);
        self.lock_delay = 0;
        self.gravity_timer = 0;

        if !self.fits(&piece) {
            self.active = None;
            self.phase = Phase::GameOver;
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Fill a reusable snapshot (no reallocation once the board buffer has grown)
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let cols = self.config.board.cols;
        let hidden = self.config.board.hidden_rows();
        let start = hidden as usize * cols as usize;

        out.cols = cols;
        out.visible_rows = self.config.board.visible_rows;
        out.hidden_rows = hidden;
        out.board.clear();
        out.board.extend_from_slice(&self.board.cells()[start..]);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.ghost = self.ghost_cells();
        out.hold = self.hold;
        out.can_hold = !self.hold_used;
        out.next_queue.clear();
        out.next_queue.extend(self.next_queue.iter().copied());
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.phase = self.phase;
        out.seed = self.bag.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Replace the active piece. Test scaffolding for staged positions.
    #[cfg(test)]
    fn place(&mut self, kind: PieceKind, rotation: crate::types::Rotation, x: i8, y: i8) {
        self.active = Some(Piece {
            kind,
            rotation,
            x,
            y,
        });
        self.lock_delay = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
