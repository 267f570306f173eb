//! Leveled, nestable terminal output for command-line programs.
//!
//! The crate is split along the same seam as its I/O:
//!
//! - **[`render`]**: Pure text layout (indentation, markers, ANSI styling).
//!   No I/O, fully testable in isolation.
//! - **[`terminal`]**: The [`Terminal`] trait and its stdio implementation.
//!   Swapped for an in-memory terminal in tests.
//!
//! [`Xmt`] combines the two with a [`Config`]. [`global`] and the exported
//! macros (`print!`, `success!`, `warn!`, `error!`, ...) drive one shared
//! process-wide instance.

pub mod config;
pub mod error;
pub mod global;
pub mod level;
mod macros;
pub mod render;
pub mod terminal;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod xmt;

pub use config::{ColorChoice, Config};
pub use error::{Error, Result};
pub use level::{Level, Stream};
pub use terminal::{StdTerminal, Terminal};
pub use xmt::Xmt;
