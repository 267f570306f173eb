//! Formatter configuration, usually stored as `xmt.toml`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::level::Stream;

const MAX_INDENT_WIDTH: usize = 16;

/// When to wrap output in ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Style a stream only when it is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(Error::InvalidConfig(format!(
                "color must be one of auto, always, never (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}

/// Formatter configuration (TOML).
///
/// Missing fields take their defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Show `Quiet` level messages.
    pub verbose: bool,

    pub color: ColorChoice,

    /// Spaces per nest level.
    pub indent_width: usize,

    /// Stream prompts are written to. Answers are always read from stdin.
    pub prompt_stream: Stream,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            color: ColorChoice::Auto,
            indent_width: 2,
            prompt_stream: Stream::Stdout,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "indent_width must be between 1 and {MAX_INDENT_WIDTH}"
            )));
        }
        Ok(())
    }

    /// Apply `XMT_VERBOSE`, `XMT_COLOR` and `NO_COLOR` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unrecognized values are ignored. A non-empty `NO_COLOR` wins over `XMT_COLOR`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("XMT_VERBOSE") {
            match parse_flag(&raw) {
                Some(verbose) => self.verbose = verbose,
                None => debug!(value = %raw, "ignoring unrecognized XMT_VERBOSE"),
            }
        }
        if let Some(raw) = lookup("XMT_COLOR") {
            match raw.parse() {
                Ok(color) => self.color = color,
                Err(_) => debug!(value = %raw, "ignoring unrecognized XMT_COLOR"),
            }
        }
        if lookup("NO_COLOR").is_some_and(|raw| !raw.is_empty()) {
            self.color = ColorChoice::Never;
        }
    }

    /// Serialize to pretty TOML with a trailing newline.
    pub fn to_toml(&self) -> Result<String> {
        let mut buf = toml::to_string_pretty(self)?;
        if !buf.ends_with('\n') {
            buf.push('\n');
        }
        Ok(buf)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = toml::from_str(&contents).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    debug!(path = %path.display(), ?cfg, "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let buf = cfg.to_toml()?;
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("xmt.toml");
        let cfg = Config {
            verbose: true,
            color: ColorChoice::Never,
            indent_width: 4,
            prompt_stream: Stream::Stderr,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "color = \"always\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.color, ColorChoice::Always);
        assert_eq!(cfg.indent_width, 2);
        assert!(!cfg.verbose);
    }

    #[test]
    fn load_rejects_zero_indent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "indent_width = 0\n").expect("write");
        let err = load_config(&path).expect_err("zero indent");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "color = \"sometimes\"\n").expect("write");
        let err = load_config(&path).expect_err("bad color");
        assert!(matches!(err, Error::ParseConfig { .. }));
        assert!(err.to_string().contains("xmt.toml"));
    }

    #[test]
    fn color_choice_parses_case_insensitively() {
        assert_eq!("ALWAYS".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!(" never ".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("rainbow".parse::<ColorChoice>().is_err());
    }

    #[test]
    fn env_overrides_verbose_and_color() {
        let mut cfg = Config::default();
        cfg.apply_env_with(env(&[("XMT_VERBOSE", "yes"), ("XMT_COLOR", "always")]));
        assert!(cfg.verbose);
        assert_eq!(cfg.color, ColorChoice::Always);
    }

    #[test]
    fn no_color_beats_xmt_color() {
        let mut cfg = Config::default();
        cfg.apply_env_with(env(&[("XMT_COLOR", "always"), ("NO_COLOR", "1")]));
        assert_eq!(cfg.color, ColorChoice::Never);
    }

    #[test]
    fn empty_no_color_is_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env_with(env(&[("NO_COLOR", "")]));
        assert_eq!(cfg.color, ColorChoice::Auto);
    }

    #[test]
    fn unrecognized_env_values_are_ignored() {
        let mut cfg = Config {
            verbose: true,
            ..Config::default()
        };
        cfg.apply_env_with(env(&[("XMT_VERBOSE", "maybe"), ("XMT_COLOR", "plaid")]));
        assert!(cfg.verbose);
        assert_eq!(cfg.color, ColorChoice::Auto);
    }
}
