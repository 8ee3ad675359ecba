//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Mode, PieceKind, Pos, Rotation};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board origin on screen, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a terminal glyph.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = u16::from(snap.width) * self.cell_w;
        let board_h = u16::from(snap.height) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', CellStyle::new(PLAYFIELD_BG, PLAYFIELD_BG));
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for row in 0..snap.height {
            for col in 0..snap.width {
                let pos = Pos::new(row as i8, col as i8);
                match PieceKind::from_color_id(snap.cell(pos.row, pos.col)) {
                    Some(kind) => self.draw_block(fb, frame, snap, pos, kind),
                    None => self.fill_board_cell(
                        fb,
                        frame,
                        snap,
                        pos,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim(),
                    ),
                }
            }
        }

        if let Some(ghost) = snap.ghost_cells() {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for pos in ghost {
                self.fill_board_cell(fb, frame, snap, pos, '░', style);
            }
        }

        if let Some(active) = snap.active {
            for pos in active.cells {
                self.draw_block(fb, frame, snap, pos, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.mode {
            Mode::Paused => draw_overlay_text(fb, frame, "PAUSED"),
            Mode::GameOver => draw_overlay_text(fb, frame, "GAME OVER"),
            Mode::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, pos: Pos, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG).bold();
        self.fill_board_cell(fb, frame, snap, pos, '█', style);
    }

    /// Paint one board cell; cells above or beside the board are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        pos: Pos,
        ch: char,
        style: CellStyle,
    ) {
        if pos.row < 0 || pos.col < 0 || pos.row as u8 >= snap.height || pos.col as u8 >= snap.width {
            return;
        }
        let px = frame.x + 1 + pos.col as u16 * self.cell_w;
        let py = frame.y + 1 + pos.row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let style = CellStyle::new(piece_color(snap.next), SCREEN_BG).bold();
        for &(drow, dcol) in shape(snap.next, Rotation::North) {
            // The preview box starts at the kind's top row; I sits on row 1.
            let top = if snap.next == PieceKind::I { 1 } else { 0 };
            let px = panel_x.saturating_add(dcol as u16 * self.cell_w);
            let py = y.saturating_add((drow - top).max(0) as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
        y = y.saturating_add(3);

        let hint = value.dim();
        for line in ["p pause", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let y = frame.y.saturating_add(frame.h / 2);
    fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold());
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
