//! Terminal I/O seam used by the formatter.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::debug;

use crate::level::Stream;

/// Where formatted text goes and where prompt answers come from.
pub trait Terminal: Send + Sync {
    /// Write `text` verbatim to `stream` and flush.
    fn write(&self, stream: Stream, text: &str) -> io::Result<()>;

    /// Read one line including its terminator, or `None` at EOF.
    fn read_line(&self) -> io::Result<Option<String>>;

    fn is_tty(&self, stream: Stream) -> bool;
}

/// Process stdio. TTY state is sampled once at construction.
#[derive(Debug, Clone, Copy)]
pub struct StdTerminal {
    stdout_tty: bool,
    stderr_tty: bool,
}

impl StdTerminal {
    pub fn new() -> Self {
        let stdout_tty = io::stdout().is_terminal();
        let stderr_tty = io::stderr().is_terminal();
        debug!(stdout_tty, stderr_tty, "detected terminal streams");
        Self {
            stdout_tty,
            stderr_tty,
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdTerminal {
    fn write(&self, stream: Stream, text: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn is_tty(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_tty,
            Stream::Stderr => self.stderr_tty,
        }
    }
}
