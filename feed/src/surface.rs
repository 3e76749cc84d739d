//! Rendering surface
//!
//! The feed replaces its entire surface every tick, so the port has a
//! single operation.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// Where feed lines end up
pub trait FeedSurface {
    /// Clear existing content, then append the given lines in order
    fn replace(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Renders the feed to the terminal on stdout
pub struct TerminalSurface {
    out: io::Stdout,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSurface for TerminalSurface {
    fn replace(&mut self, lines: &[String]) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}
