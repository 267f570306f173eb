//! Shell front end for the `xmt` formatter.
//!
//! Each subcommand formats one message (or asks one question) so scripts get
//! the same leveled, indented output as Rust programs using the library.

pub mod cli;
pub mod exit_codes;
pub mod logging;
