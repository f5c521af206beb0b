//! Rasterisation of the game state onto a character-cell `Surface`.
//!
//! Nothing here touches the terminal or the game state: `render` only reads
//! the state and overwrites every cell of the surface, back to front.

use rand::Rng;

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{GameState, PowerUpKind, Rect, Rgb};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_SKY_TOP: Rgb = Rgb(8, 8, 32);
pub const C_SKY_BOTTOM: Rgb = Rgb(40, 16, 64);
pub const C_STAR: Rgb = Rgb(255, 255, 255);
pub const C_CLOUD: Rgb = Rgb(200, 200, 230);
pub const C_PLAYER: Rgb = Rgb(0, 200, 255);
pub const C_SHIELD: Rgb = Rgb(0, 255, 200);
pub const C_ENEMY: Rgb = Rgb(255, 60, 60);
pub const C_ENEMY_ARMORED: Rgb = Rgb(200, 60, 255);
pub const C_BULLET: Rgb = Rgb(255, 255, 0);
pub const C_RAPID_FIRE: Rgb = Rgb(255, 165, 0);
pub const C_SHIELD_PICKUP: Rgb = Rgb(0, 255, 255);

const CLOUD_OPACITY: f32 = 0.15;
const SHIELD_RING_PADDING: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: ' ',
            fg: C_STAR,
            bg: C_SKY_TOP,
        }
    }
}

/// A fixed-size grid of cells onto which the world is scaled.
#[derive(Clone, Debug)]
pub struct Surface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols as usize + col as usize)
    }

    /// Iterate rows top to bottom, each as a slice of cells.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols as usize)
    }

    fn to_col(&self, x: f32) -> i32 {
        (x / WORLD_WIDTH * self.cols as f32).floor() as i32
    }

    fn to_row(&self, y: f32) -> i32 {
        (y / WORLD_HEIGHT * self.rows as f32).floor() as i32
    }

    /// Cell span covered by a world rectangle; always at least one cell.
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let c0 = self.to_col(rect.x);
        let r0 = self.to_row(rect.y);
        let c1 = ((rect.x + rect.w) / WORLD_WIDTH * self.cols as f32).ceil() as i32;
        let r1 = ((rect.y + rect.h) / WORLD_HEIGHT * self.rows as f32).ceil() as i32;
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    /// Vertical two-stop gradient; clears every glyph.
    pub fn fill_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let rows = self.rows;
        let cols = self.cols as usize;
        for (row, chunk) in self.cells.chunks_mut(cols).enumerate() {
            let t = if rows > 1 {
                row as f32 / (rows - 1) as f32
            } else {
                0.0
            };
            let bg = top.blend(bottom, t);
            for cell in chunk {
                *cell = Cell {
                    glyph: ' ',
                    fg: C_STAR,
                    bg,
                };
            }
        }
    }

    /// Draw `glyph` at a world point, its colour mixed into the cell background.
    pub fn plot(&mut self, x: f32, y: f32, glyph: char, color: Rgb, alpha: f32) {
        let (col, row) = (self.to_col(x), self.to_row(y));
        if let Some(cell) = self.get_mut(col, row) {
            cell.glyph = glyph;
            cell.fg = cell.bg.blend(color, alpha);
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect, glyph: char, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.glyph = glyph;
                    cell.fg = color;
                }
            }
        }
    }

    /// Tint the background of every cell under `rect`, leaving glyphs alone.
    pub fn tint_rect(&mut self, rect: &Rect, color: Rgb, alpha: f32) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.get_mut(col, row) {
                    cell.bg = cell.bg.blend(color, alpha);
                }
            }
        }
    }

    /// Outline of `rect`, one cell thick.
    pub fn stroke_rect(&mut self, rect: &Rect, glyph: char, color: Rgb) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                let edge = row == r0 || row == r1 - 1 || col == c0 || col == c1 - 1;
                if !edge {
                    continue;
                }
                if let Some(cell) = self.get_mut(col, row) {
                    cell.glyph = glyph;
                    cell.fg = color;
                }
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Paint one complete frame.  `rng` only drives the star flicker.
pub fn render(state: &GameState, surface: &mut Surface, rng: &mut impl Rng) {
    surface.fill_gradient(C_SKY_TOP, C_SKY_BOTTOM);

    for star in &state.stars {
        let glyph = if star.size > 1.5 { '*' } else { '.' };
        let flicker = 0.5 + rng.gen::<f32>() * 0.5;
        surface.plot(star.x, star.y, glyph, C_STAR, flicker);
    }

    for cloud in &state.clouds {
        let rect = Rect::new(cloud.x, cloud.y, cloud.width, cloud.height);
        surface.tint_rect(&rect, C_CLOUD, CLOUD_OPACITY);
    }

    let player = state.player.rect();
    if state.player.shield_active() {
        let ring = Rect::new(
            player.x - SHIELD_RING_PADDING,
            player.y - SHIELD_RING_PADDING,
            player.w + 2.0 * SHIELD_RING_PADDING,
            player.h + 2.0 * SHIELD_RING_PADDING,
        );
        surface.stroke_rect(&ring, '○', C_SHIELD);
    }
    surface.fill_rect(&player, '█', C_PLAYER);
    // Nose
    let (nose_x, _) = player.center();
    surface.plot(nose_x, player.y, '▲', C_PLAYER, 1.0);

    for enemy in &state.enemies {
        let color = if enemy.health > 1 { C_ENEMY_ARMORED } else { C_ENEMY };
        surface.fill_rect(&enemy.rect(), '▼', color);
    }

    for bullet in &state.player.bullets {
        surface.fill_rect(&bullet.rect(), '║', C_BULLET);
    }

    for particle in &state.particles {
        surface.plot(particle.x, particle.y, '•', particle.color, particle.opacity());
    }

    for power_up in &state.power_ups {
        let (glyph, color) = match power_up.kind {
            PowerUpKind::RapidFire => ('!', C_RAPID_FIRE),
            PowerUpKind::Shield => ('◎', C_SHIELD_PICKUP),
        };
        surface.fill_rect(&power_up.rect(), glyph, color);
    }
}
