//! Terminal runner (default binary).
//!
//! Fixed 16ms frames: read keys, turn them into intents, advance one gravity
//! frame, render. Restarting builds a new engine.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use srs_tetris::cli::{parse_args, RunOptions};
use srs_tetris::core::{random_seed, GameSnapshot, GameState, RulesConfig};
use srs_tetris::input::{handle_key_event, should_quit, should_restart, InputHandler};
use srs_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use srs_tetris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    // Fail on a bad ruleset before touching the terminal.
    let rules = options.rules()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &options, &rules);

    // Always try to restore terminal state.
    let _ = term.exit();

    match result {
        Ok(game) => {
            eprintln!(
                "[srs-tetris] seed {} score {} lines {} level {}",
                game.bag().seed(),
                game.score(),
                game.lines(),
                game.level()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("[srs-tetris] error: {err:#}");
            Err(err)
        }
    }
}

fn new_game(options: &RunOptions, rules: &RulesConfig) -> Result<GameState> {
    let seed = options.seed.unwrap_or_else(random_seed);
    Ok(GameState::with_config(rules.clone(), seed)?)
}

/// Play until the user quits; returns the last game.
fn run(term: &mut TerminalRenderer, options: &RunOptions, rules: &RulesConfig) -> Result<GameState> {
    let mut game = new_game(options, rules)?;

    let view = GameView::default();
    let mut input_handler = InputHandler::new().with_board_cols(rules.board.cols);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(game);
                        }
                        if should_restart(key) {
                            game = new_game(options, rules)?;
                            input_handler.reset();
                            continue;
                        }

                        // Held-key movement goes through DAS/ARR; everything
                        // else maps straight to an intent.
                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game.apply_action(action);
                        } else if let Some(action) = handle_key_event(key) {
                            if !matches!(
                                action,
                                GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
                            ) {
                                game.apply_action(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; DAS/ARR handles repeats.
                    }
                    KeyEventKind::Release => input_handler.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Frame step.
        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();

            for action in input_handler.update(TICK_MS) {
                game.apply_action(action);
            }
            game.advance_frame();
            // Lock events only drive effects, and the terminal has none.
            let _ = game.take_last_event();
        }
    }
}
