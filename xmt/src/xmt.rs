use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ColorChoice, Config};
use crate::error::{Error, Result};
use crate::level::{Level, Stream};
use crate::render;
use crate::terminal::{StdTerminal, Terminal};

/// Root formatter.
///
/// Cheap to clone; clones share the underlying terminal.
#[derive(Clone)]
pub struct Xmt {
    cfg: Config,
    indent_level: usize,
    terminal: Arc<dyn Terminal>,
}

impl Default for Xmt {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Xmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xmt")
            .field("cfg", &self.cfg)
            .field("indent_level", &self.indent_level)
            .finish_non_exhaustive()
    }
}

impl Xmt {
    /// Formatter writing to process stdio.
    pub fn new(cfg: Config) -> Self {
        Self::with_terminal(cfg, Arc::new(StdTerminal::new()))
    }

    pub fn with_terminal(cfg: Config, terminal: Arc<dyn Terminal>) -> Self {
        Self {
            cfg,
            indent_level: 0,
            terminal,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// A copy of this formatter one nest level deeper.
    pub fn nest(&self) -> Self {
        Self {
            indent_level: self.indent_level.saturating_add(1),
            ..self.clone()
        }
    }

    /// Same formatter at an explicit nest level.
    pub fn at_level(&self, indent_level: usize) -> Self {
        Self {
            indent_level,
            ..self.clone()
        }
    }

    /// Same formatter, writing prompts to `stream`.
    pub fn with_prompt_stream(&self, stream: Stream) -> Self {
        let mut xmt = self.clone();
        xmt.cfg.prompt_stream = stream;
        xmt
    }

    pub fn is_styled(&self, stream: Stream) -> bool {
        match self.cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.terminal.is_tty(stream),
        }
    }

    pub fn is_visible(&self, level: Level) -> bool {
        match level {
            Level::Quiet => self.cfg.verbose,
            Level::Detail => self.terminal.is_tty(level.stream()),
            Level::Normal | Level::Success | Level::Warn | Level::Error => true,
        }
    }

    /// Render `msg` at `level` and write it to the level's stream.
    ///
    /// Hidden levels are skipped without error.
    pub fn emit(&self, level: Level, msg: &str) -> Result<()> {
        if !self.is_visible(level) {
            return Ok(());
        }
        let stream = level.stream();
        let text = render::render(level, msg, &self.indent(), self.is_styled(stream));
        self.terminal.write(stream, &text)?;
        Ok(())
    }

    pub fn print(&self, msg: &str) {
        self.emit_or_drop(Level::Normal, msg);
    }

    pub fn detail(&self, msg: &str) {
        self.emit_or_drop(Level::Detail, msg);
    }

    pub fn quiet(&self, msg: &str) {
        self.emit_or_drop(Level::Quiet, msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit_or_drop(Level::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.emit_or_drop(Level::Warn, msg);
    }

    pub fn error(&self, msg: &str) {
        self.emit_or_drop(Level::Error, msg);
    }

    /// Raw machine-readable output: no indent, no styling, always shown.
    ///
    /// Write failures are logged and dropped; use [`Xmt::emit_raw`] to observe them.
    pub fn out(&self, text: &str) {
        if let Err(err) = self.emit_raw(text) {
            debug!(error = %err, "dropped raw output");
        }
    }

    /// Write `text` to stdout unformatted, adding a newline if it lacks one.
    pub fn emit_raw(&self, text: &str) -> Result<()> {
        if text.ends_with('\n') {
            self.terminal.write(Stream::Stdout, text)?;
        } else {
            self.terminal.write(Stream::Stdout, &format!("{text}\n"))?;
        }
        Ok(())
    }

    /// Ask for one line of input, returned without its line terminator.
    pub fn prompt(&self, msg: &str) -> Result<String> {
        self.write_prompt(msg, None)?;
        self.read_answer()
    }

    /// Ask a yes/no question, repeating until the answer is recognized.
    ///
    /// An empty answer selects `default`.
    pub fn prompt_yn(&self, msg: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.write_prompt(msg, Some(hint))?;
            let answer = self.read_answer()?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => {
                    debug!(answer = other, "unrecognized yes/no answer");
                    self.write_reask()?;
                }
            }
        }
    }

    fn write_prompt(&self, msg: &str, hint: Option<&str>) -> Result<()> {
        let stream = self.cfg.prompt_stream;
        let text = render::render_prompt(msg, &self.indent(), self.is_styled(stream), hint);
        self.terminal.write(stream, &text)?;
        Ok(())
    }

    // Kept on the prompt stream so every prompt line shares one destination.
    fn write_reask(&self) -> Result<()> {
        let stream = self.cfg.prompt_stream;
        let text = render::render(
            Level::Warn,
            "please answer y or n",
            &self.indent(),
            self.is_styled(stream),
        );
        self.terminal.write(stream, &text)?;
        Ok(())
    }

    fn read_answer(&self) -> Result<String> {
        let mut line = self.terminal.read_line()?.ok_or(Error::InputClosed)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn indent(&self) -> String {
        render::indent(self.indent_level, self.cfg.indent_width)
    }

    fn emit_or_drop(&self, level: Level, msg: &str) {
        if let Err(err) = self.emit(level, msg) {
            debug!(?level, error = %err, "dropped output");
        }
    }
}
