//! Raw-mode terminal session with mouse capture.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, event, execute, terminal};

/// Puts the terminal into game mode and restores it on drop.
pub struct TerminalSession {
    out: Stdout,
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            event::EnableMouseCapture,
        )?;
        Ok(Self { out, active: true })
    }

    /// Buffer size in pixels: one column per cell, two rows per cell.
    pub fn pixel_size(&self) -> io::Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok(pixel_size(cols, rows))
    }

    pub fn out(&mut self) -> &mut impl Write {
        &mut self.out
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.out,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

pub fn pixel_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}
