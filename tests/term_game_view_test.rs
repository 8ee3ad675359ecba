use tetro::core::{EngineConfig, GameLoop, GameSnapshot, Grid, PieceFactory};
use tetro::term::{AnchorY, FrameBuffer, GameView, Viewport};
use tetro::types::{Command, Mode, PieceKind};

fn scripted(order: &[PieceKind]) -> GameLoop {
    let factory = PieceFactory::with_order(order.to_vec()).unwrap();
    GameLoop::with_parts(&EngineConfig::default(), Grid::new(), factory).unwrap()
}

fn count_glyph(fb: &FrameBuffer, glyph: char) -> usize {
    fb.cells().iter().filter(|c| c.ch == glyph).count()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = scripted(&[PieceKind::T]).snapshot();

    // 10x20 board, 2 columns per cell, plus the border: 22x22.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19 * 10] = PieceKind::I.color_id();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
    assert_eq!(count_glyph(&fb, '█'), 2);
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = scripted(&[PieceKind::O]).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Four cells, two columns each.
    assert_eq!(count_glyph(&fb, '█'), 8);
    assert_eq!(count_glyph(&fb, '░'), 8);
    // O spawns on rows 0-1 over columns 4-5; its ghost rests on rows 18-19.
    assert_eq!(fb.get(9, 1).unwrap().ch, '█');
    assert_eq!(fb.get(9, 20).unwrap().ch, '░');
}

#[test]
fn term_view_side_panel_shows_stats() {
    let mut game = scripted(&[PieceKind::I]);
    game.handle(Command::HardDrop);
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&game.snapshot(), Viewport::new(60, 24));

    for label in ["SCORE", "LEVEL", "LINES", "NEXT"] {
        assert!(fb.contains_text(label), "missing {label}");
    }
}

#[test]
fn term_view_overlays_follow_mode() {
    let mut game = scripted(&[PieceKind::T]);
    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    assert!(!view.render(&game.snapshot(), vp).contains_text("PAUSED"));

    game.handle(Command::Pause);
    assert!(view.render(&game.snapshot(), vp).contains_text("PAUSED"));

    let mut snap = game.snapshot();
    snap.mode = Mode::GameOver;
    snap.active = None;
    assert!(view.render(&snap, vp).contains_text("GAME OVER"));
}

#[test]
fn term_view_handles_custom_board_size() {
    let config = EngineConfig::default().with_size(6, 8);
    let game = GameLoop::new(config).unwrap();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&game.snapshot(), Viewport::new(14, 10));

    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
}
