//! Rendering through the facade: snapshot in, framebuffer out

use pentris::core::GameState;
use pentris::term::{encode_frame, FrameBuffer, GameView, HudView, Viewport};
use pentris::types::{Block, GameAction, PieceKind};

#[test]
fn locked_cells_keep_their_glyph() {
    let mut state = GameState::new(1);
    state.start();
    state.board_mut().set(0, 21, Some(Block::new(PieceKind::W, '¥')));

    let view = GameView::default();
    let vp = Viewport::new(80, 30);
    let fb = view.render(&state.snapshot(), &HudView::default(), vp);
    let layout = view.layout(vp);

    let cell = fb.get(layout.start_x + 1, layout.start_y + 1 + 21).unwrap();
    assert_eq!(cell.ch, '¥');
}

#[test]
fn ghost_is_drawn_below_active_piece() {
    let mut state = GameState::new(2);
    state.start();
    let snap = state.snapshot();
    let fb = GameView::default().render(&snap, &HudView::default(), Viewport::new(80, 30));
    assert!(snap.ghost_y.unwrap() > snap.active.unwrap().y);
    assert!(fb.contains_text("░"));
}

#[test]
fn one_move_repaints_only_the_rows_under_the_piece() {
    let mut state = GameState::new(3);
    state.start();
    let view = GameView::default();
    let vp = Viewport::new(80, 30);
    let hud = HudView::default();

    let mut prev = FrameBuffer::new(80, 30);
    view.render_into(&state.snapshot(), &hud, vp, &mut prev);
    state.apply_action(GameAction::MoveLeft);
    let mut next = FrameBuffer::new(80, 30);
    view.render_into(&state.snapshot(), &hud, vp, &mut next);

    let mut diff = Vec::new();
    let rows = encode_frame(Some(&prev), &next, &mut diff).unwrap();
    let mut full = Vec::new();
    assert_eq!(encode_frame(None, &next, &mut full).unwrap(), 30);

    // Piece and ghost cover at most ten board rows.
    assert!(rows > 0 && rows <= 10);
    assert!(diff.len() < full.len() / 4);
}
