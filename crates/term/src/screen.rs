//! TerminalScreen: raw-mode setup, teardown and full-frame drawing.
//!
//! Frames here are small (two boards plus a few HUD lines), so every
//! draw is a full clear and repaint; no diffing is needed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};

pub struct TerminalScreen {
    stdout: io::Stdout,
    entered: bool,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            entered: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear the screen and print the frame, one line per row.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for line in lines {
            // Raw mode needs the explicit carriage return.
            self.stdout.queue(Print(line))?;
            self.stdout.queue(Print("\r\n"))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
