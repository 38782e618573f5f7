/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates
/// state into terminal commands. World units are scaled down onto the
/// character grid: one cell is 8 units wide and 16 tall, so the default
/// 640×480 world fills an 80×30 area under the HUD row.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use platform_game::entities::{Entity, EntityKind, GameState, GameStatus};

// ── Cell scale ────────────────────────────────────────────────────────────────

const CELL_W: i32 = 8;
const CELL_H: i32 = 16;
/// Rows above the play area reserved for the HUD.
const HUD_ROWS: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_COINS: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_MONSTER: Color = Color::Red;
const C_COIN: Color = Color::Yellow;
const C_WALL: Color = Color::DarkBlue;
const C_DOOR: Color = Color::Magenta;
const C_FLAME: Color = Color::DarkYellow;
const C_ROPE: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

fn appearance(kind: EntityKind) -> (&'static str, Color) {
    match kind {
        EntityKind::Player => ("█", C_PLAYER),
        EntityKind::Monster => ("▓", C_MONSTER),
        EntityKind::Coin => ("●", C_COIN),
        EntityKind::Wall => ("█", C_WALL),
        EntityKind::Door => ("▒", C_DOOR),
        EntityKind::Flame => ("^", C_FLAME),
        EntityKind::Rope => ("|", C_ROPE),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, state)?;

    // Scenery first, then coins and monsters, the player always on top.
    for e in &state.entities {
        if matches!(
            e.kind,
            EntityKind::Wall | EntityKind::Door | EntityKind::Flame | EntityKind::Rope
        ) {
            draw_entity(out, e)?;
        }
    }
    for e in &state.entities {
        if matches!(e.kind, EntityKind::Coin | EntityKind::Monster) {
            draw_entity(out, e)?;
        }
    }
    for e in &state.entities {
        if e.id == state.player_id {
            draw_entity(out, e)?;
        }
    }

    draw_controls_hint(out, state)?;

    match state.status {
        GameStatus::Won => draw_outcome(out, state, "YOU  WIN", Color::Green)?,
        GameStatus::Lost => draw_outcome(out, state, "GAME  OVER", Color::Red)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid_rows(state) + HUD_ROWS))?;
    out.flush()?;
    Ok(())
}

fn grid_cols(state: &GameState) -> u16 {
    ((state.bounds.right - state.bounds.left) / CELL_W).max(1) as u16
}

fn grid_rows(state: &GameState) -> u16 {
    ((state.bounds.bottom - state.bounds.top) / CELL_H).max(1) as u16
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!(
        "Coins:{:>2}/{}",
        state.coins_collected, state.coins_total
    )))?;

    let hearts: String = "♥".repeat(state.health as usize);
    let health_str = format!("Health:{}", hearts);
    let rx = grid_cols(state).saturating_sub(health_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill the entity's scaled box with its kind glyph. Every entity covers at
/// least one cell so small pickups stay visible.
fn draw_entity<W: Write>(out: &mut W, e: &Entity) -> std::io::Result<()> {
    let (glyph, color) = appearance(e.kind);

    let col_start = e.position.x / CELL_W;
    let col_end = ((e.position.x + e.hitbox.x) / CELL_W).max(col_start + 1);
    let row_start = e.position.y / CELL_H;
    let row_end = ((e.position.y + e.hitbox.y) / CELL_H).max(row_start + 1);

    out.queue(style::SetForegroundColor(color))?;
    let span: String = glyph.repeat((col_end - col_start) as usize);
    for row in row_start..row_end {
        if row < 0 || col_start < 0 {
            continue;
        }
        out.queue(cursor::MoveTo(col_start as u16, row as u16 + HUD_ROWS))?;
        out.queue(Print(&span))?;
    }
    Ok(())
}

// ── Controls hint (below the play area) ───────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid_rows(state) + HUD_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ / W / SPACE : Jump   Q : Quit",
    ))?;
    Ok(())
}

// ── Outcome overlay ───────────────────────────────────────────────────────────

fn draw_outcome<W: Write>(
    out: &mut W,
    state: &GameState,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let width = title.chars().count() + 8;
    let top = format!("╔{}╗", "═".repeat(width));
    let mid = format!("║    {}    ║", title);
    let bottom = format!("╚{}╝", "═".repeat(width));
    let score_line = format!("Coins collected: {}/{}", state.coins_collected, state.coins_total);
    let hint = "R - Play Again  Q - Quit";

    let cx = grid_cols(state) / 2;
    let cy = (grid_rows(state) + HUD_ROWS) / 2;

    let boxed: &[&str] = &[top.as_str(), mid.as_str(), bottom.as_str()];
    for (i, line) in boxed.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*line))?;
    }

    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, cy + 2))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, cy + 3))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
