use crate::command::Command;
use crate::game::{Cell, InputSource, RenderSink};
use crossterm::event;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// The terminal collaborator: owns raw mode and the alternate screen, draws
/// single cells, and polls for key presses.
#[derive(Debug)]
pub(crate) struct Tty {
    stdout: Stdout,
}

impl Tty {
    /// Character cells available, as `(width, height)`
    pub(crate) fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Enter raw mode on the alternate screen with the cursor hidden.  Every
    /// `open` must be paired with a [`Tty::close`] on all exit paths, or the
    /// user gets their shell back in an unusable state.
    pub(crate) fn open() -> io::Result<Tty> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Tty { stdout })
    }

    pub(crate) fn close(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl RenderSink for Tty {
    /// Queue a single-cell update; the batch reaches the screen when the
    /// game next polls for input.
    fn draw_cell(&mut self, cell: Cell, glyph: char) -> io::Result<()> {
        // A cell that has wandered off the addressable screen is silently
        // skipped rather than treated as an error.
        let (Ok(col), Ok(row)) = (u16::try_from(cell.col), u16::try_from(cell.row)) else {
            return Ok(());
        };
        queue!(self.stdout, cursor::MoveTo(col, row), style::Print(glyph))
    }
}

impl InputSource for Tty {
    /// Block for up to `timeout` waiting for a key press.  Events that are
    /// not key presses (resizes, focus changes, key releases) are swallowed
    /// without resetting the tick clock.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        // Flush the cell updates queued during the previous tick, once per
        // frame, before waiting for input.
        self.stdout.flush()?;
        let deadline = Instant::now() + timeout;
        loop {
            let wait = deadline.saturating_duration_since(Instant::now());
            if wait.is_zero() || !event::poll(wait)? {
                return Ok(None);
            }
            if let Some(ev) = event::read()?.as_key_press_event() {
                if let Some(cmd) = Command::from_key_event(ev) {
                    return Ok(Some(cmd));
                }
            }
        }
    }
}
