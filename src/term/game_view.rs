//! GameView: maps the game session into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape, AchievementTracker, GameState};
use crate::term::effects::ParticleField;
use crate::term::fb::{FrameBuffer, Rgb, TextStyle};
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

/// Map a piece kind to its display color. The core stores only the kind;
/// presentation decides what it looks like.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(255, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
    }
}

/// A lightweight terminal renderer for the play session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current session into a framebuffer.
    pub fn render(
        &self,
        state: &GameState,
        achievements: &AchievementTracker,
        particles: &ParticleField,
        banner: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(TextStyle::default().glyph(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = 2u16;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = TextStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(20, 20, 28),
            bold: false,
            dim: false,
        };
        let border = TextStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = state.board().get(x, y) {
                    self.fill_cell(&mut fb, start_x, start_y, x as u16, y as u16, '█', TextStyle {
                        fg: kind_color(kind),
                        ..bg
                    });
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost_y)) = (state.active(), state.ghost_y()) {
            let ghost = TextStyle {
                fg: Rgb::new(140, 140, 140),
                dim: true,
                ..bg
            };
            for (dx, dy) in active.matrix.filled_cells() {
                self.draw_board_cell(&mut fb, start_x, start_y, active.x + dx, ghost_y + dy, '░', ghost);
            }
        }

        // Active piece.
        if let Some(active) = state.active() {
            let style = TextStyle {
                fg: kind_color(active.kind),
                bold: true,
                ..bg
            };
            for (dx, dy) in active.matrix.filled_cells() {
                self.draw_board_cell(&mut fb, start_x, start_y, active.x + dx, active.y + dy, '█', style);
            }
        }

        // Particles from recent line clears.
        for p in particles.iter() {
            let x = p.x.floor() as i32;
            let y = p.y.floor() as i32;
            if x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32 {
                let px = start_x + 1 + (x as u16) * self.cell_w;
                let py = start_y + 1 + (y as u16) * self.cell_h;
                fb.put_char(px, py, '*', TextStyle {
                    fg: kind_color(p.kind),
                    bold: true,
                    ..bg
                });
            }
        }

        self.draw_panel(&mut fb, state, achievements, start_x + frame_w + 2, start_y);
        self.draw_overlays(&mut fb, state, start_x, start_y, frame_w, frame_h);

        if let Some(name) = banner {
            let style = TextStyle {
                fg: Rgb::new(0, 255, 0),
                bg: Rgb::new(0, 0, 0),
                bold: true,
                dim: false,
            };
            let text = format!("Achievement unlocked: {}", name);
            let x = viewport.width.saturating_sub(text.chars().count() as u16) / 2;
            fb.put_str(x, start_y.saturating_sub(1), &text, style);
        }

        fb
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: TextStyle,
    ) {
        for dx in 1..w.saturating_sub(1) {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h.saturating_sub(1) {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
    }

    /// Draw one board cell if it is inside the visible field.
    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: TextStyle,
    ) {
        if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
            self.fill_cell(fb, start_x, start_y, x as u16, y as u16, ch, style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: TextStyle,
    ) {
        fb.fill_rect(
            start_x + 1 + x * self.cell_w,
            start_y + 1 + y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        achievements: &AchievementTracker,
        x: u16,
        y: u16,
    ) {
        let label = TextStyle::default();
        let value = TextStyle {
            bold: true,
            ..TextStyle::default()
        };
        let dim = TextStyle {
            fg: Rgb::new(120, 120, 120),
            ..TextStyle::default()
        };

        fb.put_str(x, y, &format!("Score  {}", state.score()), value);
        fb.put_str(x, y + 1, &format!("Best   {}", state.highscore()), label);
        fb.put_str(x, y + 2, &format!("Level  {}", state.level()), label);
        fb.put_str(x, y + 3, &format!("Lines  {}", state.lines()), label);

        fb.put_str(x, y + 5, "Next:", label);
        let mut py = y + 6;
        for &kind in state.next_pieces() {
            let matrix = shape(kind);
            let style = TextStyle {
                fg: kind_color(kind),
                ..TextStyle::default()
            };
            for (dx, dy) in matrix.filled_cells() {
                let gx = x + (dx as u16) * 2;
                let gy = py + dy as u16;
                fb.put_str(gx, gy, "██", style);
            }
            py += matrix.height() as u16 + 1;
        }

        fb.put_str(x, py + 1, "Achievements:", label);
        for (i, entry) in achievements.entries().iter().enumerate() {
            let row = py + 2 + i as u16;
            if entry.is_unlocked() {
                fb.put_str(x, row, &format!("✓ {}", entry.name), value);
            } else {
                fb.put_str(x, row, &format!("· {}", entry.name), dim);
            }
        }
    }

    fn draw_overlays(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let overlay = TextStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };

        let center = |text: &str| start_x + (frame_w.saturating_sub(text.chars().count() as u16)) / 2;

        if state.game_over() {
            let title = "GAME OVER";
            let hint = "press R to restart";
            fb.put_str(center(title), start_y + frame_h / 2 - 1, title, overlay);
            fb.put_str(center(hint), start_y + frame_h / 2 + 1, hint, overlay);
        } else if state.paused() {
            let title = "PAUSED";
            fb.put_str(center(title), start_y + frame_h / 2, title, overlay);
        }
    }
}
