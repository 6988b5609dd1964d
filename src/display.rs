//! Terminal rendering.  Every byte written to the screen goes through here.
//!
//! `TerminalRenderer` implements the simulation's `Renderer` trait on top of
//! any writer.  World coordinates are divided by the cell size to find the
//! terminal cell; anything that falls outside the terminal is clipped.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_invasion::entities::{Rect, Rgb, Sprite};
use alien_invasion::interfaces::Renderer;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Cyan;

pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    /// World units covered by one terminal cell.
    cell_w: f32,
    cell_h: f32,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16, cell_w: f32, cell_h: f32) -> Self {
        TerminalRenderer {
            out,
            width,
            height,
            cell_w,
            cell_h,
        }
    }

    /// Cell for a world position, or `None` when it is off screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (col, row) = ((x / self.cell_w).round(), (y / self.cell_h).round());
        if col < 0.0 || row < 0.0 || col >= self.width as f32 || row >= self.height as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// One row of a sprite stretched or cut to `cells` columns.
fn sprite_row(sprite: Sprite, cells: usize) -> String {
    let pattern = match sprite {
        Sprite::Ship => "/▲\\",
        Sprite::Enemy => "«▼»",
        Sprite::Projectile => "║",
    };
    if cells == pattern.chars().count() {
        return pattern.to_string();
    }
    pattern.chars().cycle().take(cells).collect()
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    fn clear(&mut self, color: Rgb) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_entity(&mut self, rect: &Rect, sprite: Sprite) -> std::io::Result<()> {
        let color = match sprite {
            Sprite::Ship => C_SHIP,
            Sprite::Enemy => C_ENEMY,
            Sprite::Projectile => C_PROJECTILE,
        };
        let cols = (rect.w / self.cell_w).round().max(1.0) as usize;
        let rows = (rect.h / self.cell_h).round().max(1.0) as usize;
        let row_text = sprite_row(sprite, cols);

        self.out.queue(style::SetForegroundColor(color))?;
        for r in 0..rows {
            let y = rect.y + r as f32 * self.cell_h;
            // Clip column by column so sprites half off the edge still show.
            for (c, ch) in row_text.chars().enumerate() {
                if let Some((col, row)) = self.cell(rect.x + c as f32 * self.cell_w, y) {
                    self.out.queue(cursor::MoveTo(col, row))?;
                    self.out.queue(Print(ch))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: (f32, f32), color: Rgb) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(position.0, position.1) else {
            return Ok(());
        };
        let room = (self.width - col) as usize;
        let visible: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }
}
