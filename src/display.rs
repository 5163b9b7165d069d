//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! driver.  No game logic is performed; this module only translates state
//! into terminal commands.  World coordinates are divided by the cell size
//! to find terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use jack_flap::entities::{Actor, Character, Obstacle, RunState, CHARACTERS};
use jack_flap::score::HighScoreStore;
use jack_flap::{Driver, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_FALLBACK_ACTOR: Color = Color::Yellow;
const C_FALLBACK_OBSTACLE: Color = Color::Green;

// ── Skins ─────────────────────────────────────────────────────────────────────

/// How a skin reference looks in the terminal.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Skin {
    glyph: char,
    color: Color,
}

const FALLBACK_ACTOR: Skin = Skin { glyph: '●', color: C_FALLBACK_ACTOR };
const FALLBACK_OBSTACLE: Skin = Skin { glyph: '█', color: C_FALLBACK_OBSTACLE };

/// Resolve a skin reference. Unknown references have no skin and are drawn
/// with the fallback shapes.
fn skin(reference: &str) -> Option<Skin> {
    let (glyph, color) = match reference {
        "sparrow" => ('☠', Color::DarkYellow),
        "sparrow_pipe" => ('▓', Color::DarkYellow),
        "titanic" => ('♥', Color::Blue),
        "titanic_pipe" => ('▒', Color::Blue),
        "jackjack" => ('☺', Color::Red),
        "jackjack_pipe" => ('▓', Color::Red),
        "black" => ('♫', Color::Magenta),
        "black_pipe" => ('▒', Color::DarkMagenta),
        "shining" => ('✦', Color::DarkRed),
        "shining_pipe" => ('▓', Color::DarkRed),
        "skellington" => ('☻', Color::White),
        "skellington_pipe" => ('▒', Color::Grey),
        "jackBean" => ('♣', Color::Green),
        "jackBean_pipe" => ('▓', Color::DarkGreen),
        "bananaJack" => ('☼', Color::Yellow),
        "bananaJack_pipe" => ('▒', Color::DarkYellow),
        "daniels" => ('◆', Color::DarkYellow),
        "daniels_pipe" => ('▓', Color::DarkGrey),
        "weaver" => ('★', Color::Cyan),
        _ => return None,
    };
    Some(Skin { glyph, color })
}

// ── Cell mapping ──────────────────────────────────────────────────────────────

/// World units per terminal cell.
#[derive(Clone, Copy, Debug)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    fn col(&self, x: f32) -> i32 {
        (x / self.width).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.height).floor() as i32
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame for the driver's current phase.
pub fn render<W: Write, S: HighScoreStore>(
    out: &mut W,
    driver: &Driver<S>,
    cell: CellSize,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match driver.phase() {
        Phase::Menu => draw_menu(out, driver.high_score().best())?,
        Phase::Running | Phase::Ended => {
            let state = driver.state();
            let (obstacle_skin, actor_skin) = match driver.selection() {
                Some(c) => (skin(c.obstacle_skin), skin(c.actor_skin)),
                None => (None, None),
            };
            let (cols, rows) = terminal::size()?;
            let width = driver.tuning().obstacle_width;

            for obstacle in &state.obstacles {
                draw_obstacle(out, obstacle, width, obstacle_skin, cell, cols, rows)?;
            }
            draw_actor(out, &state.actor, actor_skin, cell, cols, rows)?;
            draw_hud(out, state)?;

            if state.ended {
                draw_game_over(out, cols, rows)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, high_score: u32) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let top = (height / 2).saturating_sub(CHARACTERS.len() as u16 / 2 + 4);

    let title = "JACK FLAP";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.len() as u16 / 2), top))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if high_score > 0 {
        let best = format!("High Score: {}", high_score);
        out.queue(cursor::MoveTo(cx.saturating_sub(best.len() as u16 / 2), top + 1))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), top + 3))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("Choose your Jack:"))?;

    for (i, character) in CHARACTERS.iter().enumerate() {
        let row = top + 5 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", i)))?;
        draw_menu_entry(out, character)?;
    }

    let hint = "0-9 : Choose   Q : Quit";
    let row = top + 6 + CHARACTERS.len() as u16;
    out.queue(cursor::MoveTo(cx.saturating_sub(hint.len() as u16 / 2), row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_menu_entry<W: Write>(out: &mut W, character: &Character) -> std::io::Result<()> {
    let s = skin(character.actor_skin).unwrap_or(FALLBACK_ACTOR);
    out.queue(style::SetForegroundColor(s.color))?;
    out.queue(Print(s.glyph))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(" {}", character.name)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_obstacle<W: Write>(
    out: &mut W,
    obstacle: &Obstacle,
    obstacle_width: f32,
    skin: Option<Skin>,
    cell: CellSize,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let s = skin.unwrap_or(FALLBACK_OBSTACLE);
    let left = cell.col(obstacle.x).max(0);
    let right = cell.col(obstacle.x + obstacle_width).min(cols as i32);
    if left >= right {
        return Ok(());
    }
    let segment: String = std::iter::repeat(s.glyph)
        .take((right - left) as usize)
        .collect();

    // Top barrier covers rows above the gap, bottom barrier rows below it
    let gap_first = cell.row(obstacle.gap_top);
    let gap_last = cell.row(obstacle.gap_bottom);

    out.queue(style::SetForegroundColor(s.color))?;
    for row in 0..rows as i32 {
        if row >= gap_first && row <= gap_last {
            continue;
        }
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print(&segment))?;
    }
    Ok(())
}

fn draw_actor<W: Write>(
    out: &mut W,
    actor: &Actor,
    skin: Option<Skin>,
    cell: CellSize,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let s = skin.unwrap_or(FALLBACK_ACTOR);
    out.queue(style::SetForegroundColor(s.color))?;

    let first_row = cell.row(actor.y - actor.radius).max(0);
    let last_row = cell.row(actor.y + actor.radius).min(rows as i32 - 1);
    let first_col = cell.col(actor.x - actor.radius).max(0);
    let last_col = cell.col(actor.x + actor.radius).min(cols as i32 - 1);

    // Fill cells whose centre lies inside the disc; always at least the centre
    let mut drew = false;
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            let cx = (col as f32 + 0.5) * cell.width;
            let cy = (row as f32 + 0.5) * cell.height;
            let (dx, dy) = (cx - actor.x, cy - actor.y);
            if dx * dx + dy * dy <= actor.radius * actor.radius {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(s.glyph))?;
                drew = true;
            }
        }
    }

    let (col, row) = (cell.col(actor.x), cell.row(actor.y));
    if !drew && (0..cols as i32).contains(&col) && (0..rows as i32).contains(&row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(s.glyph))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &RunState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("Score: {}", state.score)))?;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(Print(format!("High Score: {}", state.high_score)))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("GAME OVER", C_GAME_OVER),
        ("", C_GAME_OVER),
        ("Press SPACE to restart", C_GAME_OVER),
        ("Press ENTER to choose new character", C_GAME_OVER),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2 + 1);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
