//! Command-line definition and dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use xmt::config::{load_config, write_config};
use xmt::{ColorChoice, Config, Level, Stream, Xmt};

use crate::exit_codes;

/// Config file used when `--config` and `XMT_CONFIG` are both absent.
pub const DEFAULT_CONFIG_PATH: &str = "xmt.toml";

/// Deepest nest level accepted by `--indent`.
pub const MAX_INDENT_LEVEL: i64 = 64;

#[derive(Debug, Parser)]
#[command(
    name = "xmt",
    version,
    about = "Leveled, nestable terminal output for shell scripts"
)]
pub struct Cli {
    /// Config file (TOML). Missing files fall back to defaults.
    #[arg(long, global = true, env = "XMT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show quiet-level messages.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to style output: auto, always, never.
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Nest level to start at.
    #[arg(
        long,
        global = true,
        default_value_t = 0,
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u16).range(..=MAX_INDENT_LEVEL)
    )]
    pub indent: u16,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Message {
    /// Words joined with single spaces.
    #[arg(required = true)]
    pub words: Vec<String>,
}

impl Message {
    fn text(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normal output on stdout.
    Print(Message),
    /// Decoration shown only when stdout is a terminal.
    Detail(Message),
    /// Output shown only in verbose mode.
    Quiet(Message),
    /// Success line on stdout.
    Success(Message),
    /// Warning line on stdout.
    Warn(Message),
    /// Error line on stderr.
    Error(Message),
    /// Raw text on stdout: no indent, no styling.
    Out(Message),
    /// Ask for a line of input (prompt on stderr, answer on stdout).
    Prompt(Message),
    /// Ask a yes/no question; exits 0 for yes and 2 for no.
    Confirm {
        #[command(flatten)]
        message: Message,

        /// Treat an empty answer as yes.
        #[arg(long)]
        default_yes: bool,
    },
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective config (file, then environment, then flags).
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn config_path(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH))
    }
}

/// Merge config sources: file, then environment, then command-line flags.
pub fn resolve_config<F>(cli: &Cli, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let path = cli.config_path();
    let cfg = load_config(path).with_context(|| format!("load {}", path.display()))?;
    let cfg = apply_overrides(cli, cfg, env);
    debug!(?cfg, "resolved config");
    Ok(cfg)
}

/// Defaults plus environment and flags, for when the file is not consulted.
pub fn config_without_file<F>(cli: &Cli, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    apply_overrides(cli, Config::default(), env)
}

fn apply_overrides<F>(cli: &Cli, mut cfg: Config, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    cfg.apply_env_with(env);
    if cli.verbose {
        cfg.verbose = true;
    }
    if let Some(color) = cli.color {
        cfg.color = color;
    }
    cfg
}

/// Run the parsed command against process stdio, returning the exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    if let Command::Config {
        command: ConfigCommand::Init { force },
    } = &cli.command
    {
        xmt::global::init(config_without_file(cli, process_env));
        return init_config(cli.config_path(), *force);
    }

    let cfg = match resolve_config(cli, process_env) {
        Ok(cfg) => cfg,
        Err(err) => {
            // The error is reported through the global formatter; honor
            // color and verbosity settings that did not come from the file.
            xmt::global::init(config_without_file(cli, process_env));
            return Err(err);
        }
    };
    let xmt = Xmt::new(cfg).at_level(usize::from(cli.indent));
    xmt::global::init_with(xmt.clone());
    execute(&cli.command, &xmt)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Execute a command with an already configured formatter.
pub fn execute(command: &Command, xmt: &Xmt) -> Result<i32> {
    match command {
        Command::Print(msg) => emit(xmt, Level::Normal, msg),
        Command::Detail(msg) => emit(xmt, Level::Detail, msg),
        Command::Quiet(msg) => emit(xmt, Level::Quiet, msg),
        Command::Success(msg) => emit(xmt, Level::Success, msg),
        Command::Warn(msg) => emit(xmt, Level::Warn, msg),
        Command::Error(msg) => emit(xmt, Level::Error, msg),
        Command::Out(msg) => {
            xmt.emit_raw(&msg.text()).context("write output")?;
            Ok(exit_codes::OK)
        }
        Command::Prompt(msg) => {
            let answer = xmt
                .with_prompt_stream(Stream::Stderr)
                .prompt(&msg.text())
                .context("read answer")?;
            xmt.emit_raw(&answer).context("write answer")?;
            Ok(exit_codes::OK)
        }
        Command::Confirm {
            message,
            default_yes,
        } => {
            let yes = xmt
                .with_prompt_stream(Stream::Stderr)
                .prompt_yn(&message.text(), *default_yes)
                .context("read answer")?;
            Ok(if yes {
                exit_codes::OK
            } else {
                exit_codes::DECLINED
            })
        }
        Command::Config {
            command: ConfigCommand::Show,
        } => {
            let toml = xmt.config().to_toml().context("serialize config")?;
            xmt.emit_raw(&toml).context("write config")?;
            Ok(exit_codes::OK)
        }
        Command::Config {
            command: ConfigCommand::Init { .. },
        } => anyhow::bail!("config init must run before a config file is loaded"),
    }
}

fn emit(xmt: &Xmt, level: Level, msg: &Message) -> Result<i32> {
    xmt.emit(level, &msg.text())
        .with_context(|| format!("write {level:?} message"))?;
    Ok(exit_codes::OK)
}

fn init_config(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        xmt::warn!("{} already exists (use --force to overwrite)", path.display());
        return Ok(exit_codes::OK);
    }
    write_config(path, &Config::default()).with_context(|| format!("write {}", path.display()))?;
    xmt::success!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parse_print_joins_words() {
        let cli = Cli::parse_from(["xmt", "print", "hello", "world"]);
        let Command::Print(msg) = cli.command else {
            panic!("expected print");
        };
        assert_eq!(msg.text(), "hello world");
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "xmt", "warn", "x", "--indent", "2", "--color", "never", "-v",
        ]);
        assert_eq!(cli.indent, 2);
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_confirm_default_yes() {
        let cli = Cli::parse_from(["xmt", "confirm", "Deploy?", "--default-yes"]);
        assert!(matches!(
            cli.command,
            Command::Confirm {
                default_yes: true,
                ..
            }
        ));
    }

    #[test]
    fn parse_config_init_force() {
        let cli = Cli::parse_from(["xmt", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Init { force: true }
            }
        ));
    }

    #[test]
    fn indent_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["xmt", "--indent", "65", "print", "x"]).is_err());
        assert!(
            Cli::try_parse_from(["xmt", "--indent", "18446744073709551615", "print", "x"]).is_err()
        );
        let cli = Cli::parse_from(["xmt", "--indent", "64", "print", "x"]);
        assert_eq!(cli.indent, 64);
    }

    #[test]
    fn config_without_file_applies_env_and_flags() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "indent_width = 0\n").expect("write");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "xmt", "--config", path_arg.as_str(), "-v", "--color", "always", "print", "x",
        ]);
        let cfg = config_without_file(&cli, no_env);
        assert_eq!(cfg.color, ColorChoice::Always);
        assert!(cfg.verbose);
        assert_eq!(cfg.indent_width, 2);

        let cli = Cli::parse_from(["xmt", "config", "init"]);
        let cfg = config_without_file(&cli, |key: &str| {
            (key == "NO_COLOR").then(|| "1".to_string())
        });
        assert_eq!(cfg.color, ColorChoice::Never);
    }

    #[test]
    fn message_is_required() {
        assert!(Cli::try_parse_from(["xmt", "print"]).is_err());
    }

    #[test]
    fn invalid_color_is_rejected() {
        assert!(Cli::try_parse_from(["xmt", "print", "x", "--color", "plaid"]).is_err());
    }

    #[test]
    fn flags_override_env_and_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "color = \"always\"\nindent_width = 3\n").expect("write");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["xmt", "--config", path_arg.as_str(), "print", "x"]);
        let cfg = resolve_config(&cli, no_env).expect("resolve");
        assert_eq!(cfg.color, ColorChoice::Always);
        assert_eq!(cfg.indent_width, 3);

        let env: HashMap<&str, &str> = [("NO_COLOR", "1"), ("XMT_VERBOSE", "0")].into();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());
        let cfg = resolve_config(&cli, lookup).expect("resolve");
        assert_eq!(cfg.color, ColorChoice::Never);
        assert!(!cfg.verbose);

        let cli = Cli::parse_from([
            "xmt", "--config", path_arg.as_str(), "-v", "--color", "auto", "print", "x",
        ]);
        let cfg = resolve_config(&cli, lookup).expect("resolve");
        assert_eq!(cfg.color, ColorChoice::Auto);
        assert!(cfg.verbose);
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("xmt.toml");
        fs::write(&path, "indent_width = 99\n").expect("write");
        let path_arg = path.to_string_lossy().into_owned();

        let cli = Cli::parse_from(["xmt", "--config", path_arg.as_str(), "print", "x"]);
        let err = resolve_config(&cli, no_env).expect_err("invalid");
        assert!(format!("{err:#}").contains("indent_width"));
    }
}
