use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use tardis_shooter::config::Settings;
use tardis_shooter::display;
use tardis_shooter::engine;
use tardis_shooter::entities::Bounds;
use tardis_shooter::scene::{DeviceIdiom, GameScene};

/// How far one arrow / A / D press nudges the player.
const KEY_STEP: f32 = 2.0;

/// Longest frame we simulate in one go, so a stalled terminal doesn't
/// fast-forward the game.
const MAX_FRAME_DT: Duration = Duration::from_millis(250);

/// Terminals at least this big get the tablet background.
const PAD_MIN_COLS: u16 = 120;
const PAD_MIN_ROWS: u16 = 40;

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Title ─────────────────────────────────────────────────────────────────────

enum TitleResult {
    Start,
    Quit,
}

/// Show the title screen, fading it in over `crossfade`, and wait for the
/// player to start or quit.
fn show_title<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    crossfade: Duration,
    frame: Duration,
) -> std::io::Result<TitleResult> {
    let (width, height) = terminal::size()?;

    let fade_start = Instant::now();
    loop {
        let elapsed = fade_start.elapsed();
        if elapsed >= crossfade {
            break;
        }
        let alpha = (elapsed.as_secs_f32() / crossfade.as_secs_f32()).min(1.0);
        display::render_title(out, width, height, alpha)?;
        // Input during the fade is dropped.
        while rx.try_recv().is_ok() {}
        thread::sleep(frame);
    }
    display::render_title(out, width, height, 1.0)?;

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, modifiers, kind, .. })) if kind != KeyEventKind::Release => {
                if is_quit(code, modifiers) {
                    return Ok(TitleResult::Quit);
                }
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return Ok(TitleResult::Start);
                }
            }
            Ok(Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), .. })) => {
                return Ok(TitleResult::Start);
            }
            Ok(Event::Resize(w, h)) => display::render_title(out, w, h, 1.0)?,
            Ok(_) => {}
            Err(_) => return Ok(TitleResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum PlayResult {
    /// The scene handed off to the title with this crossfade.
    Title(Duration),
    Quit,
}

/// Run one game scene until it hands off to the title or the user quits.
///
/// The terminal stands in for the engine: mouse drags are touches, arrow
/// keys are touches a couple of columns either side of the player, and this
/// loop is also the life system that calls `game_over` once the player is
/// struck.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> std::io::Result<PlayResult> {
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    // The bottom row holds the score.
    let bounds = Bounds::new(cols as f32, rows.saturating_sub(1) as f32);
    let idiom = if cols >= PAD_MIN_COLS && rows >= PAD_MIN_ROWS {
        DeviceIdiom::Pad
    } else {
        DeviceIdiom::Phone
    };

    let mut scene = GameScene::new(bounds, idiom, settings.level);
    scene.did_move(&mut rng);

    let frame = settings.frame();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut touches: Vec<f32> = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind != KeyEventKind::Release => {
                    if is_quit(code, modifiers) {
                        return Ok(PlayResult::Quit);
                    }
                    let step = match code {
                        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => -KEY_STEP,
                        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => KEY_STEP,
                        _ => continue,
                    };
                    if let Some(x) = scene.keyboard_touch(step) {
                        touches.push(x);
                    }
                }
                Event::Mouse(MouseEvent { kind: MouseEventKind::Drag(_), column, .. }) => {
                    touches.push(column as f32);
                }
                _ => {}
            }
        }
        if !touches.is_empty() {
            scene.touch_moved(&touches);
        }

        let now = Instant::now();
        let dt = (now - last).min(MAX_FRAME_DT);
        last = now;

        let transition = engine::step(&mut scene, dt, &mut rng);
        if scene.is_player_down() {
            scene.game_over();
        }

        display::render(out, &scene)?;

        if let Some(transition) = transition {
            return Ok(PlayResult::Title(transition.crossfade));
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::error!("terminal event read failed: {}", e);
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let settings = Settings::load(&Settings::default_path());
    let frame = settings.frame();

    // The first title appears without a crossfade.
    let mut crossfade = Duration::ZERO;
    loop {
        match show_title(out, rx, crossfade, frame)? {
            TitleResult::Quit => break,
            TitleResult::Start => match game_loop(out, rx, &settings)? {
                PlayResult::Quit => break,
                PlayResult::Title(fade) => crossfade = fade,
            },
        }
    }
    log::info!("Bye");
    Ok(())
}
