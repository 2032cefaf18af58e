//! Console setup, input translation and frame output.

use crate::app::Input;
use crate::graphics::Rgb;
use crate::surface::Surface;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    MouseEventKind,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, BufWriter, Stdout, Write};

/// Size used when neither termsize nor crossterm can tell
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Current terminal size as (cols, rows)
pub fn initial_size() -> (u16, u16) {
    if let Some(size) = termsize::get() {
        if size.cols > 0 && size.rows > 0 {
            return (size.cols, size.rows);
        }
    }
    terminal::size().unwrap_or(FALLBACK_SIZE)
}

/// Puts the terminal into full-screen interactive mode and restores it on drop
pub struct TerminalGuard {
    out: BufWriter<Stdout>,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        execute!(
            out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;
        Ok(TerminalGuard { out })
    }

    /// Writes a whole frame
    pub fn draw(&mut self, surface: &Surface) -> io::Result<()> {
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        let mut bold = false;

        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        for (row, cells) in surface.rows_iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    queue!(self.out, SetBackgroundColor(color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                if bold != cell.bold {
                    let attribute = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.out, SetAttribute(attribute))?;
                    bold = cell.bold;
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            terminal::EndSynchronizedUpdate
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            DisableFocusChange,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )
        .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::error!("Failed to restore terminal: {}", err);
        }
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Maps a terminal event to host input; events the app does not use map to `None`
pub fn translate(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) => Some(Input::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                Some(Input::Pointer {
                    col: mouse.column,
                    row: mouse.row,
                })
            }
            _ => None,
        },
        Event::FocusLost => Some(Input::PointerLeave),
        Event::Resize(cols, rows) => Some(Input::Resize { cols, rows }),
        _ => None,
    }
}
