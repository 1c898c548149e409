//! GameView: maps a `GameSnapshot` plus front-end state into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, Phase, TouchButton, BOARD_HEIGHT, BOARD_WIDTH};

/// Rows of the leaderboard shown in the side panel.
pub const LEADERBOARD_ROWS: usize = 10;

/// Touch pad button width in columns, e.g. `[ ◀ ]`.
const BUTTON_W: u16 = 5;
/// Rows from one pad button to the next (one blank row between).
const BUTTON_STRIDE: u16 = 2;
/// Columns between the pad and the board frame.
const PAD_GUTTER: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// One leaderboard line as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderRow {
    pub name: String,
    pub score: u32,
}

/// State of the end-of-session name prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptView<'a> {
    #[default]
    Hidden,
    Entering {
        name: &'a str,
    },
    Submitting,
    Submitted,
    Failed,
}

/// Everything outside the game state that the side panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView<'a> {
    /// Empty means "not known", shown as `unknown`.
    pub leaderboard: &'a [LeaderRow],
    pub coupon: Option<&'a str>,
    pub prompt: PromptView<'a>,
}

/// Screen positions derived from the viewport.
///
/// The touch pad is a column of buttons left of the board, so the whole
/// layout needs no more rows than the board frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub pad_x: u16,
    pub pad_y: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;

        // Centre the board, but never so far left that the pad falls off.
        let left = BUTTON_W + PAD_GUTTER;
        let start_x = (viewport.width.saturating_sub(frame_w) / 2).max(left);
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        // Pad sits level with the lower half of the board, near the thumb.
        let pad_h = pad_height();
        let pad_y = start_y + frame_h.saturating_sub(pad_h + 1);

        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            pad_x: start_x - left,
            pad_y,
        }
    }

    /// Map a pointer position to the touch button under it.
    pub fn touch_hit(&self, viewport: Viewport, col: u16, row: u16) -> Option<TouchButton> {
        let layout = self.layout(viewport);
        if col < layout.pad_x || col >= layout.pad_x + BUTTON_W || row < layout.pad_y {
            return None;
        }
        let rel = row - layout.pad_y;
        if rel % BUTTON_STRIDE != 0 {
            return None;
        }
        TouchButton::ALL.get((rel / BUTTON_STRIDE) as usize).copied()
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only resized when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(block) => self.draw_block(fb, &layout, x as u16, y as u16, *block, false),
                    None => self.draw_empty_cell(fb, &layout, x as u16, y as u16),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            for (dx, dy, block) in active.matrix.occupied() {
                if let Some((x, y)) = on_board(active.x + dx, ghost_y + dy) {
                    let style =
                        CellStyle::new(Rgb::from(block.kind.color()).scaled(1, 2), BOARD_BG).dim();
                    self.fill_cell_rect(fb, &layout, x, y, '░', style);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y, block) in active.cells() {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_block(fb, &layout, x, y, block, true);
                }
            }
        }

        self.draw_touch_pad(fb, &layout);
        self.draw_side_panel(fb, snap, hud, viewport, &layout);

        match snap.phase {
            Phase::NotStarted => self.draw_overlay_text(fb, &layout, "PRESS ENTER"),
            Phase::Paused => self.draw_overlay_text(fb, &layout, "PAUSED"),
            Phase::GameOver => self.draw_overlay_text(fb, &layout, "GAME OVER"),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        let px = layout.start_x + 1 + x * self.cell_w;
        let py = layout.start_y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    /// A block shows its own glyph, tinted by the shape that produced it.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: u16, y: u16, block: Block, active: bool) {
        let color = Rgb::from(block.kind.color());
        let style = CellStyle {
            fg: PANEL_BG,
            bg: if active { color } else { color.scaled(3, 4) },
            bold: active,
            dim: false,
        };
        self.fill_cell_rect(fb, layout, x, y, block.glyph, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + cell_x * self.cell_w;
        let py = layout.start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_touch_pad(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(50, 50, 70)).bold();
        let mut y = layout.pad_y;
        for button in TouchButton::ALL {
            fb.put_str(layout.pad_x, y, "[   ]", style);
            fb.put_str(layout.pad_x + 2, y, button.label(), style);
            y += BUTTON_STRIDE;
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = layout.start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y += 1;
        if hud.leaderboard.is_empty() {
            fb.put_str(panel_x, y, "unknown", dim);
            y += 1;
        } else {
            for (i, row) in hud.leaderboard.iter().take(LEADERBOARD_ROWS).enumerate() {
                let x = fb.put_u32(panel_x, y, i as u32 + 1, dim);
                let x = fb.put_str(x, y, ". ", dim);
                fb.put_str(x, y, &row.name, value);
                fb.put_u32(panel_x + 15, y, row.score, value);
                y += 1;
            }
        }
        y += 1;

        if let Some(code) = hud.coupon {
            let gold = CellStyle::new(Rgb::new(247, 220, 111), PANEL_BG).bold();
            fb.put_str(panel_x, y, "REWARD UNLOCKED", gold);
            fb.put_str(panel_x, y + 1, code, gold);
            y += 3;
        }

        match hud.prompt {
            PromptView::Hidden => {}
            PromptView::Entering { name } => {
                let x = fb.put_str(panel_x, y, "NAME: ", label);
                let x = fb.put_str(x, y, name, value);
                fb.put_char(x, y, '_', value.bold());
                fb.put_str(panel_x, y + 1, "Enter ok  Esc skip", dim);
            }
            PromptView::Submitting => {
                fb.put_str(panel_x, y, "submitting...", dim);
            }
            PromptView::Submitted => {
                fb.put_str(panel_x, y, "score saved", value);
                fb.put_str(panel_x, y + 1, "R restart", dim);
            }
            PromptView::Failed => {
                let warn = CellStyle::new(Rgb::new(255, 107, 107), PANEL_BG).bold();
                fb.put_str(panel_x, y, "submit failed", warn);
                fb.put_str(panel_x, y + 1, "Enter retry  Esc skip", dim);
                fb.put_str(panel_x, y + 2, "R restart", dim);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn pad_height() -> u16 {
    let n = TouchButton::ALL.len() as u16;
    (n - 1) * BUTTON_STRIDE + 1
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && (x as u8) < BOARD_WIDTH && y >= 0 && (y as u8) < BOARD_HEIGHT {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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
