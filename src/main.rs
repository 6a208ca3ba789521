// What you SEE:
// • Hold Left Mouse and drag: freehand pen strokes.
// • [ / ] thinner / thicker. T: type a thickness, Enter to apply, Esc to cancel.
// • 1..9 pick a palette color. P opens the RGB picker: R/G/B choose a channel,
//   digits set it, Enter accepts, Esc cancels.
// • C clears, Z undoes the last stroke.
// • S saves to the document path, O loads it back. ESC quits.
// • The title bar shows the pen and the result of the last save/load.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use minifb::Key;

use pen_paint::draw::{Drawer, draw_brush_cursor};
use pen_paint::error::Error;
use pen_paint::image_io::png_path;
use pen_paint::pen::{Channel, ColorEntry};
use pen_paint::{FrameBuffer, PaintConfig, PaintSession, Point};

/// Minimal raster paint program
#[derive(Parser, Debug)]
#[command(name = "pen-paint")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to <config dir>/pen-paint/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PNG to open at startup and to save to
    file: Option<PathBuf>,
}

/// Shell-only state that is not part of the drawing core.
struct Shell {
    config: PaintConfig,
    document: PathBuf,
    entering_thickness: bool,
    color_entry: Option<ColorEntry>,
    status: String,
    quit: bool,
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    /* --- Configuration --- */
    let config_path = args.config.clone().unwrap_or_else(PaintConfig::default_path);
    let config = PaintConfig::load_from(&config_path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        PaintConfig::default()
    });
    info!("Configuration loaded from {}", config_path.display());

    /* --- Session + window ---
       Visual: a white 900x700 page opens. */
    let mut session = PaintSession::from_config(&config);
    // One resolved path for startup, S and O alike.
    let document = png_path(&args.file.unwrap_or_else(|| config.document.clone()));
    if document.exists() {
        match session.load(&document) {
            Ok(()) => info!("Opened {}", document.display()),
            Err(e) => warn!("{e}"),
        }
    }

    let (w, h) = (config.width as usize, config.height as usize);
    let mut drawer = Drawer::new(&config.title, w, h)?;
    let mut screen = FrameBuffer::filled(w, h, 0x00FF_FFFF);

    let mut shell = Shell {
        config,
        document,
        entering_thickness: false,
        color_entry: None,
        status: String::new(),
        quit: false,
    };

    /* --- Pointer tracking ---
       A press starts a stroke; motion while held extends it. */
    let mut was_down = false;
    let mut last_sample: Option<Point> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !shell.quit {
        /* 1) Keyboard commands */
        for key in drawer.keys_pressed() {
            handle_key(&mut shell, &mut session, key);
        }

        /* 2) Pointer → stroke */
        let down = drawer.left_mouse_down();
        let mouse = drawer.mouse_pos().map(Point::from);
        match (was_down, down, mouse) {
            (false, true, Some(p)) => {
                session.on_press_at(p);
                last_sample = Some(p);
            }
            (true, true, Some(p)) if last_sample != Some(p) => {
                session.on_drag_to(p);
                last_sample = Some(p);
            }
            (true, false, _) if session.is_drawing() => {
                session.end_stroke();
                last_sample = None;
            }
            _ => {}
        }
        was_down = down;

        /* 3) Repaint: canvas, then the brush outline on top */
        session.compose_into(&mut screen);
        if let Some(p) = mouse {
            draw_brush_cursor(&mut screen, p.x as i32, p.y as i32, session.pen().thickness.get());
        }

        drawer.set_title(&title(&shell, &session));
        drawer.present(&screen)?;
    }

    Ok(())
}

fn handle_key(shell: &mut Shell, session: &mut PaintSession, key: Key) {
    if let Some(mut entry) = shell.color_entry.take() {
        match key {
            Key::Enter | Key::NumPadEnter => session.finish_color_dialog(entry.accept()),
            Key::Escape => session.finish_color_dialog(entry.cancel()),
            other => {
                match other {
                    Key::R => entry.select(Channel::Red),
                    Key::G => entry.select(Channel::Green),
                    Key::B => entry.select(Channel::Blue),
                    Key::Backspace => entry.pop_digit(),
                    _ => {
                        if let Some(d) = digit(other) {
                            entry.push_digit(d);
                        }
                    }
                }
                shell.color_entry = Some(entry);
            }
        }
        return;
    }

    if shell.entering_thickness {
        match key {
            Key::Enter | Key::NumPadEnter => {
                shell.entering_thickness = false;
                if let Err(e) = session.submit_thickness_field() {
                    shell.status = e.to_string();
                }
            }
            Key::Escape => {
                shell.entering_thickness = false;
                let current = session.pen().thickness;
                session.thickness_control_mut().notify(current);
            }
            Key::Backspace => session.thickness_control_mut().pop_char(),
            other => {
                if let Some(d) = digit(other) {
                    session.thickness_control_mut().push_char(char::from(b'0' + d));
                }
            }
        }
        return;
    }

    match key {
        Key::Escape => shell.quit = true,
        Key::C => session.clear(),
        Key::Z => {
            session.undo();
        }
        Key::LeftBracket => {
            let t = session.pen().thickness.get() as i64;
            session.set_thickness(t - 1);
        }
        Key::RightBracket => {
            let t = session.pen().thickness.get() as i64;
            session.set_thickness(t + 1);
        }
        Key::T => {
            shell.entering_thickness = true;
            session.thickness_control_mut().edit_text("");
        }
        Key::P => shell.color_entry = Some(ColorEntry::new(session.color_dialog())),
        Key::S => {
            let result = session.save(&shell.document);
            shell.status = status_text("saved", &shell.document, result);
        }
        Key::O => {
            let result = session.load(&shell.document);
            shell.status = status_text("loaded", &shell.document, result);
        }
        other => {
            // Palette colors go through the RGB picker, confirmed at once.
            if let Some(color) = digit(other)
                .filter(|d| *d > 0)
                .and_then(|d| shell.config.palette_color(d as usize - 1))
            {
                let mut dialog = session.color_dialog();
                dialog.set(Channel::Red, color.r);
                dialog.set(Channel::Green, color.g);
                dialog.set(Channel::Blue, color.b);
                session.finish_color_dialog(dialog.accept());
            }
        }
    }
}

fn digit(key: Key) -> Option<u8> {
    Some(match key {
        Key::Key0 | Key::NumPad0 => 0,
        Key::Key1 | Key::NumPad1 => 1,
        Key::Key2 | Key::NumPad2 => 2,
        Key::Key3 | Key::NumPad3 => 3,
        Key::Key4 | Key::NumPad4 => 4,
        Key::Key5 | Key::NumPad5 => 5,
        Key::Key6 | Key::NumPad6 => 6,
        Key::Key7 | Key::NumPad7 => 7,
        Key::Key8 | Key::NumPad8 => 8,
        Key::Key9 | Key::NumPad9 => 9,
        _ => return None,
    })
}

/// Title-bar text for a save/load: file failures are shown to the user,
/// anything else is only logged.
fn status_text(done: &str, path: &std::path::Path, result: Result<(), Error>) -> String {
    match result {
        Ok(()) => format!("{done} {}", path.display()),
        Err(e) if e.is_io_failure() => {
            error!("{e}");
            e.to_string()
        }
        Err(e) => {
            error!("{e}");
            String::from("unexpected error, see log")
        }
    }
}

fn title(shell: &Shell, session: &PaintSession) -> String {
    let pen = session.pen();
    if let Some(entry) = &shell.color_entry {
        let d = entry.dialog();
        let mark = |c: Channel| if entry.channel() == c { ">" } else { "" };
        return format!(
            "{} | pick color: {}R {} {}G {} {}B {} | Enter ok, Esc cancel",
            shell.config.title,
            mark(Channel::Red),
            d.get(Channel::Red),
            mark(Channel::Green),
            d.get(Channel::Green),
            mark(Channel::Blue),
            d.get(Channel::Blue),
        );
    }
    let thickness = if shell.entering_thickness {
        format!("thickness: {}_", session.thickness_control().text())
    } else {
        format!("thickness {}", session.thickness_control().slider())
    };
    let mut title = format!("{} | {} | {}", shell.config.title, pen.color, thickness);
    if !shell.status.is_empty() {
        title.push_str(" | ");
        title.push_str(&shell.status);
    }
    title
}
