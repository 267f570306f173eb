//! In-memory terminal for exercising formatters without real stdio.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::level::Stream;
use crate::terminal::Terminal;
use crate::xmt::Xmt;

/// Captures written output and replays scripted input lines.
#[derive(Debug, Default)]
pub struct MemoryTerminal {
    stdout: Mutex<String>,
    stderr: Mutex<String>,
    input: Mutex<VecDeque<String>>,
    stdout_tty: bool,
    stderr_tty: bool,
}

impl MemoryTerminal {
    /// Non-TTY terminal with no scripted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal that reports both streams as TTYs.
    pub fn tty() -> Self {
        Self {
            stdout_tty: true,
            stderr_tty: true,
            ..Self::default()
        }
    }

    /// Queue input lines; each is delivered with a trailing newline.
    pub fn with_input<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input
            .lock()
            .extend(lines.into_iter().map(|line| format!("{}\n", line.into())));
        self
    }

    pub fn stdout(&self) -> String {
        self.stdout.lock().clone()
    }

    pub fn stderr(&self) -> String {
        self.stderr.lock().clone()
    }
}

impl Terminal for MemoryTerminal {
    fn write(&self, stream: Stream, text: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => self.stdout.lock().push_str(text),
            Stream::Stderr => self.stderr.lock().push_str(text),
        }
        Ok(())
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self.input.lock().pop_front())
    }

    fn is_tty(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_tty,
            Stream::Stderr => self.stderr_tty,
        }
    }
}

/// Terminal whose writes always fail, as with a closed pipe.
#[derive(Debug, Default)]
pub struct BrokenTerminal;

impl Terminal for BrokenTerminal {
    fn write(&self, _stream: Stream, _text: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn is_tty(&self, _stream: Stream) -> bool {
        false
    }
}

/// Build a formatter over a fresh in-memory terminal and return both.
pub fn memory_xmt(cfg: Config, terminal: MemoryTerminal) -> (Xmt, Arc<MemoryTerminal>) {
    let terminal = Arc::new(terminal);
    let xmt = Xmt::with_terminal(cfg, terminal.clone());
    (xmt, terminal)
}
