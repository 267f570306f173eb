//! Error type shared by the formatter, prompts, and config loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input reached EOF while a prompt was waiting for an answer.
    #[error("input closed before an answer was read")]
    InputClosed,

    #[error("read {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("serialize config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
