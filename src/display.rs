//! Terminal layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! rendered surface and game state.  No game logic is performed; this module
//! only translates them into terminal commands.
//!
//! Layout: row 0 is the HUD, the surface fills the rows in between, the last
//! row holds the controls hint.  Screen overlays are drawn on top.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{GameState, GameStatus, Rgb};
use crate::render::Surface;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_BG: Color = Color::Black;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_POWERUP_ACTIVE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY_BG: Color = Color::Black;

/// Rows reserved for the HUD and the hint line.
pub const CHROME_ROWS: u16 = 2;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Surface dimensions that fit a terminal of the given size.
pub fn surface_size(width: u16, height: u16) -> (u16, u16) {
    (width.max(1), height.saturating_sub(CHROME_ROWS).max(1))
}

/// Whole seconds left on a power-up timer, rounded up.
pub fn seconds_left(ms: u32) -> u32 {
    ms.div_ceil(1000)
}

/// Right-hand HUD tag listing running power-ups and their seconds left.
pub fn power_up_tag(state: &GameState) -> String {
    let mut right = Vec::new();
    if state.player.rapid_fire_active() {
        right.push(format!("[! RAPID {:>2}s]", seconds_left(state.player.rapid_fire_ms)));
    }
    if state.player.shield_active() {
        right.push(format!("[◎ SHIELD {:>2}s]", seconds_left(state.player.shield_ms)));
    }
    right.join(" ")
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn present<W: Write>(out: &mut W, surface: &Surface, state: &GameState) -> std::io::Result<()> {
    draw_hud(out, surface.cols(), state)?;
    draw_surface(out, surface)?;
    draw_controls_hint(out, surface.rows() + 1)?;

    match state.status {
        GameStatus::Start => draw_start(out, surface, state)?,
        GameStatus::Paused => draw_paused(out, surface)?,
        GameStatus::GameOver => draw_game_over(out, surface, state)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, surface.rows() + 1))?;
    out.flush()?;
    Ok(())
}

// ── Surface ───────────────────────────────────────────────────────────────────

fn draw_surface<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    for (row, cells) in surface.rows_iter().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16 + 1))?;
        let mut current: Option<(Rgb, Rgb)> = None;
        for cell in cells {
            if current != Some((cell.fg, cell.bg)) {
                out.queue(style::SetForegroundColor(color(cell.fg)))?;
                out.queue(style::SetBackgroundColor(color(cell.bg)))?;
                current = Some((cell.fg, cell.bg));
            }
            out.queue(Print(cell.glyph))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, width: u16, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(Print(" ".repeat(width as usize)))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("  Level:{:>2}", state.level)))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("  Lives:{}", "♥".repeat(state.lives as usize))))?;

    let power_tag = power_up_tag(state);
    if !power_tag.is_empty() {
        let rx = width.saturating_sub(power_tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   SPACE : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centre a block of coloured lines over the surface.
fn draw_box<W: Write>(
    out: &mut W,
    surface: &Surface,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = surface.cols() / 2;
    // +1 skips the HUD row
    let start_row = (surface.rows() / 2 + 1).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetBackgroundColor(C_OVERLAY_BG))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_start<W: Write>(out: &mut W, surface: &Surface, state: &GameState) -> std::io::Result<()> {
    let mut lines = vec![
        ("★  SKY  SHOOTER  ★".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("Power-ups (catch falling items):".to_string(), Color::DarkGrey),
        ("!  Rapid fire — shorter cooldown".to_string(), Color::DarkYellow),
        ("◎  Shield     — no contact damage".to_string(), Color::Cyan),
        (String::new(), Color::White),
        ("ENTER / SPACE : Start     Q : Quit".to_string(), Color::White),
    ];
    if state.best_score > 0 {
        lines.insert(1, (format!("Best Score: {}", state.best_score), Color::Yellow));
    }
    draw_box(out, surface, &lines)
}

fn draw_paused<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Yellow),
        ("║       PAUSED       ║".to_string(), Color::Yellow),
        ("╚════════════════════╝".to_string(), Color::Yellow),
        ("ENTER / P - Resume   R - Restart".to_string(), Color::White),
    ];
    draw_box(out, surface, &lines)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    surface: &Surface,
    state: &GameState,
) -> std::io::Result<()> {
    let best_line = if state.is_new_best() {
        (format!("★ NEW BEST: {:>6} ★", state.score), Color::Yellow)
    } else {
        (format!("Best Score:  {:>6}", state.best_score), Color::DarkGrey)
    };
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", state.score), Color::Yellow),
        (format!("Level reached: {:>4}", state.level), Color::Green),
        best_line,
        ("ENTER / R - Play Again   Q - Quit".to_string(), Color::White),
    ];
    draw_box(out, surface, &lines)
}
