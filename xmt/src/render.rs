//! Pure text layout for formatted messages.
//!
//! Nothing here touches a terminal: callers decide whether output is styled
//! and at which nest level, and get back the exact text to write.

use std::sync::Once;

use colored::Colorize;

use crate::level::Level;

/// Upper bound on indentation, in columns.
pub const MAX_INDENT_COLUMNS: usize = 1024;

/// Leading whitespace for a nest level, capped at [`MAX_INDENT_COLUMNS`].
pub fn indent(level: usize, width: usize) -> String {
    " ".repeat(level.saturating_mul(width).min(MAX_INDENT_COLUMNS))
}

/// Render `msg` at `level`, prefixed by `indent`, ending with a newline.
///
/// The level marker is written on the first line only; continuation lines
/// are aligned under the text that follows it. Empty lines carry no
/// indentation.
pub fn render(level: Level, msg: &str, indent: &str, styled: bool) -> String {
    let marker = level.marker();
    let continuation = format!("{indent}{}", " ".repeat(marker.chars().count()));

    let mut out = String::with_capacity(indent.len() + marker.len() + msg.len() + 1);
    let mut lines = msg.split('\n');
    let first = lines.next().unwrap_or_default();
    push_line(&mut out, indent, &format!("{marker}{first}"), level, styled);
    for line in lines {
        push_line(&mut out, &continuation, line, level, styled);
    }
    out
}

/// Render a prompt: indent, message, optional hint, then a single space.
///
/// No newline is appended; the answer is typed on the same line.
pub fn render_prompt(msg: &str, indent: &str, styled: bool, hint: Option<&str>) -> String {
    let mut text = format!("{indent}{msg}");
    if let Some(hint) = hint {
        text.push(' ');
        if styled {
            force_colors();
            text.push_str(&hint.dimmed().to_string());
        } else {
            text.push_str(hint);
        }
    }
    text.push(' ');
    text
}

fn push_line(out: &mut String, prefix: &str, line: &str, level: Level, styled: bool) {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        out.push('\n');
        return;
    }
    out.push_str(prefix);
    match level.paint(line).filter(|_| styled) {
        Some(painted) => {
            force_colors();
            out.push_str(&painted.to_string());
        }
        None => out.push_str(line),
    }
    out.push('\n');
}

// Styling is decided per stream by `Xmt`, so colored's own environment and
// stdout TTY checks must not veto it.
fn force_colors() {
    static FORCE: Once = Once::new();
    FORCE.call_once(|| colored::control::set_override(true));
}
