//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable.

use crate::core::{template, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Vertical placement of the playfield in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = GlyphStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        };
        let border = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Play area background.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);

        // Border.
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Settled board cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_index(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Falling piece overlay.
        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = active.y + dy;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        // Side panel (score/level/lines/next).
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "GAME OVER");
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 1, "R TO RESTART");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: GlyphStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = GlyphStyle {
            fg: Rgb::new(70, 70, 82),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', piece_style(kind));
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: GlyphStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = GlyphStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            self.draw_preview(fb, panel_x, y, viewport, kind);
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
    }

    /// Draw the lookahead piece as a miniature of its shape matrix.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        panel_x: u16,
        panel_y: u16,
        viewport: Viewport,
        kind: PieceKind,
    ) {
        let shape = template(kind);
        let style = piece_style(kind);
        for (dx, dy) in shape.cells() {
            let px = panel_x + (dx as u16) * self.cell_w;
            let py = panel_y + dy as u16;
            if py >= viewport.height {
                continue;
            }
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        line: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = GlyphStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Block style for a piece kind, using the catalog colors.
fn piece_style(kind: PieceKind) -> GlyphStyle {
    let (r, g, b) = kind.rgb();
    GlyphStyle {
        fg: Rgb::new(r, g, b),
        bg: Rgb::new(20, 20, 28),
        bold: true,
        dim: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, GameSnapshot};

    fn find_text(fb: &FrameBuffer, text: &str) -> bool {
        let w = fb.width();
        let h = fb.height();
        let needle: Vec<char> = text.chars().collect();
        for y in 0..h {
            for x in 0..w.saturating_sub(needle.len() as u16 - 1) {
                if needle
                    .iter()
                    .enumerate()
                    .all(|(i, &ch)| fb.get(x + i as u16, y).map(|g| g.ch) == Some(ch))
                {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_panel_labels_rendered() {
        let snap = GameSnapshot::new();
        let fb = GameView::default().render(&snap, Viewport::new(60, 26));
        assert!(find_text(&fb, "SCORE"));
        assert!(find_text(&fb, "LEVEL"));
        assert!(find_text(&fb, "LINES"));
        assert!(find_text(&fb, "NEXT"));
    }

    #[test]
    fn test_active_piece_uses_catalog_color() {
        let mut snap = GameSnapshot::new();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            shape: template(PieceKind::I),
            x: 3,
            y: 0,
        });
        let fb = GameView::default().render(&snap, Viewport::new(60, 26));

        let (r, g, b) = PieceKind::I.rgb();
        let want = Rgb::new(r, g, b);
        assert!(fb
            .glyphs()
            .iter()
            .any(|glyph| glyph.ch == '█' && glyph.style.fg == want));
    }

    #[test]
    fn test_overlays() {
        let mut snap = GameSnapshot::new();
        snap.paused = true;
        let fb = GameView::default().render(&snap, Viewport::new(60, 26));
        assert!(find_text(&fb, "PAUSED"));

        snap.paused = false;
        snap.game_over = true;
        let fb = GameView::default().render(&snap, Viewport::new(60, 26));
        assert!(find_text(&fb, "GAME OVER"));
        assert!(find_text(&fb, "R TO RESTART"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::new();
        let _ = GameView::default().render(&snap, Viewport::new(5, 3));
    }
}
