use srs_tetris::core::{Board, GameState, RulesConfig};
use srs_tetris::term::{FrameBuffer, GameView, Viewport};
use srs_tetris::types::{Cell, GameAction, PieceKind};

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // visible board = 10*2 by 20*1 => 20x20, plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut board = Board::default();
    board.set(0, 21, Cell::Occupied(PieceKind::I));
    let game = GameState::from_board(RulesConfig::default(), 1, board).unwrap();

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(22, 22));

    // Inside border: (1,1) origin; bottom visible row is 20.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_skips_hidden_rows_and_draws_ghost() {
    let game = GameState::new(1);
    let snap = game.snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Freshly spawned piece sits in the hidden rows: nothing solid on screen.
    let solid = (0..22)
        .flat_map(|y| (0..22).map(move |x| (x, y)))
        .filter(|&(x, y)| fb.get(x, y).unwrap().ch == '█')
        .count();
    assert_eq!(solid, 0);

    // Ghost lands on the floor: the bottom visible row shows ghost glyphs.
    assert!(fb.row_text(20).contains('░'));
}

#[test]
fn term_view_draws_side_panel_and_overlays() {
    let mut game = GameState::new(1);
    game.apply_action(GameAction::HardDrop);
    game.apply_action(GameAction::Pause);

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(60, 24));
    let text: Vec<String> = (0..24).map(|y| fb.row_text(y)).collect();

    assert!(text.iter().any(|row| row.contains("SCORE")));
    assert!(text.iter().any(|row| row.contains("NEXT")));
    assert!(text.iter().any(|row| row.contains("COMBO")));
    assert!(text.iter().any(|row| row.contains("PAUSED")));
    assert!(text.iter().any(|row| row.trim_end().ends_with('2')));
}

#[test]
fn term_view_reuses_framebuffer() {
    let snap = GameState::new(3).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    let first: Vec<_> = fb.glyphs().to_vec();

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!(fb.glyphs(), first.as_slice());
}
