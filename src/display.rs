/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// scene.  No game logic is performed; this module only translates world
/// coordinates (y up) into terminal cells (row 0 at the top).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Entity, EntityKind};
use crate::hud::{Label, MAIN_FONT_SIZE};
use crate::scene::{Background, GameScene};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Map a label's alpha onto the few shades a terminal has.
fn shade(alpha: f32) -> Option<Color> {
    if alpha > 0.66 {
        Some(Color::White)
    } else if alpha > 0.33 {
        Some(Color::Grey)
    } else if alpha > 0.0 {
        Some(Color::DarkGrey)
    } else {
        None
    }
}

/// Terminal cell for a world point, if it lands inside the play field.
fn to_cell(x: f32, y: f32, width: u16, field_rows: u16) -> Option<(u16, u16)> {
    let col = x.round();
    let row = (field_rows as f32 - 1.0 - y).round();
    if col < 0.0 || row < 0.0 || col >= width as f32 || row >= field_rows as f32 {
        return None;
    }
    Some((col as u16, row as u16))
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of the game scene.
pub fn render<W: Write>(out: &mut W, scene: &GameScene) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let width = scene.bounds.width as u16;
    let field_rows = scene.bounds.height as u16;

    if let Some(background) = &scene.background {
        draw_background(out, background, width, field_rows)?;
    }
    for entity in scene.entities() {
        draw_entity(out, entity, width, field_rows)?;
    }
    if let Some(label) = &scene.hud.main_label {
        draw_main_label(out, label, width, field_rows)?;
    }
    if let Some(label) = &scene.hud.score_label {
        draw_score_label(out, label, width, field_rows)?;
    }
    draw_controls_hint(out, width, field_rows)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, field_rows))?;
    out.flush()?;
    Ok(())
}

/// Render the title screen at `alpha` (0 = black, 1 = fully shown).
pub fn render_title<W: Write>(out: &mut W, width: u16, height: u16, alpha: f32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if let Some(color) = shade(alpha) {
        let cx = width / 2;
        let cy = height / 2;
        let lines: &[(&str, Color)] = &[
            ("╔══════════════════════╗", Color::Blue),
            ("║   T A R D I S   vs   ║", Color::Blue),
            ("║     THE   DALEKS     ║", Color::Blue),
            ("╚══════════════════════╝", Color::Blue),
            ("", color),
            ("Drag the mouse to steer the Tardis", color),
            ("ENTER / click : Play     Q : Quit", color),
        ];
        let start_row = cy.saturating_sub(lines.len() as u16 / 2);
        for (i, (msg, line_color)) in lines.iter().enumerate() {
            // The frame only shows once the fade is well under way.
            let line_color = if alpha > 0.5 { *line_color } else { color };
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            out.queue(style::SetForegroundColor(line_color))?;
            out.queue(Print(*msg))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_background<W: Write>(
    out: &mut W,
    background: &Background,
    width: u16,
    field_rows: u16,
) -> std::io::Result<()> {
    // A fixed star pattern; larger scale means sparser stars.
    let spacing = (17.0 * background.x_scale * background.y_scale) as u32;
    out.queue(style::SetForegroundColor(C_STAR))?;
    for row in 0..field_rows {
        for col in 0..width {
            let hash = (col as u32).wrapping_mul(7919) ^ (row as u32).wrapping_mul(104_729);
            if hash % spacing.max(2) == 0 {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("·"))?;
            }
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(
    out: &mut W,
    entity: &Entity,
    width: u16,
    field_rows: u16,
) -> std::io::Result<()> {
    let Some((col, row)) = to_cell(entity.x, entity.y, width, field_rows) else {
        return Ok(());
    };
    match entity.kind {
        EntityKind::Player => {
            //   ▄▄▄   ← lamp and roof
            //   [▓]   ← police box
            draw_sprite(out, col, row, field_rows, C_PLAYER, "▄▄▄", "[▓]")?;
        }
        EntityKind::Enemy => {
            //   ╓█╖   ← dome and eyestalk
            //   ▟▀▙   ← skirt
            draw_sprite(out, col, row, field_rows, C_ENEMY, "╓█╖", "▟▀▙")?;
        }
        EntityKind::Projectile => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_PROJECTILE))?;
            out.queue(Print("║"))?;
        }
    }
    Ok(())
}

/// A 3-wide, 2-tall sprite centred on `col`, top row at `row`.
fn draw_sprite<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    field_rows: u16,
    color: Color,
    top: &str,
    bottom: &str,
) -> std::io::Result<()> {
    let lx = col.saturating_sub(1);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(top))?;
    if row + 1 < field_rows {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print(bottom))?;
    }
    Ok(())
}

// ── Labels ────────────────────────────────────────────────────────────────────

fn draw_main_label<W: Write>(
    out: &mut W,
    label: &Label,
    width: u16,
    field_rows: u16,
) -> std::io::Result<()> {
    let Some(color) = shade(label.alpha) else {
        return Ok(());
    };
    let cx = width / 2;
    let cy = field_rows / 2;
    out.queue(style::SetForegroundColor(color))?;

    if label.font_size >= MAIN_FONT_SIZE {
        // Big text gets a frame around it.
        let inner = format!("   {}   ", label.text);
        let bar = "═".repeat(inner.chars().count());
        let lines = [format!("╔{}╗", bar), format!("║{}║", inner), format!("╚{}╝", bar)];
        for (i, line) in lines.iter().enumerate() {
            let col = cx.saturating_sub(line.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, cy.saturating_sub(1) + i as u16))?;
            out.queue(Print(line))?;
        }
    } else {
        let col = cx.saturating_sub(label.text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, cy))?;
        out.queue(Print(&label.text))?;
    }
    Ok(())
}

/// The score sits on the row just below the play field.
fn draw_score_label<W: Write>(
    out: &mut W,
    label: &Label,
    width: u16,
    field_rows: u16,
) -> std::io::Result<()> {
    let Some(color) = shade(label.alpha) else {
        return Ok(());
    };
    let col = (width / 2).saturating_sub(label.text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, field_rows))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&label.text))?;
    Ok(())
}

// ── Controls hint (last row, left) ────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, width: u16, field_rows: u16) -> std::io::Result<()> {
    let hint = "drag / ← → : move   Q : quit";
    if (hint.chars().count() as u16) * 3 > width {
        return Ok(());
    }
    out.queue(cursor::MoveTo(1, field_rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
