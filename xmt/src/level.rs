//! Output levels and the streams they are routed to.

use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// Standard output stream a message is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Different output levels supported by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Normal output level.
    Normal,

    /// Formatting that is not critical to the output.
    ///
    /// Omitted when its stream is not a TTY.
    Detail,

    /// Only displayed in verbose mode.
    Quiet,

    /// Completed work. Printed to stdout.
    Success,

    /// Warnings. Printed to stdout.
    Warn,

    /// Errors. Printed to stderr.
    Error,
}

impl Level {
    pub fn stream(self) -> Stream {
        match self {
            Level::Error => Stream::Stderr,
            Level::Normal | Level::Detail | Level::Quiet | Level::Success | Level::Warn => {
                Stream::Stdout
            }
        }
    }

    /// Fixed prefix written before the first line of a message.
    pub fn marker(self) -> &'static str {
        match self {
            Level::Success => "✔ ",
            Level::Warn => "warning: ",
            Level::Error => "error: ",
            Level::Normal | Level::Detail | Level::Quiet => "",
        }
    }

    /// Apply this level's styling to `text`, or `None` for unstyled levels.
    ///
    /// Whether the result renders with escapes is decided by the caller;
    /// see [`crate::render`].
    pub fn paint(self, text: &str) -> Option<ColoredString> {
        match self {
            Level::Normal => None,
            Level::Detail | Level::Quiet => Some(text.dimmed()),
            Level::Success => Some(text.green()),
            Level::Warn => Some(text.yellow().bold()),
            Level::Error => Some(text.red().bold()),
        }
    }
}
