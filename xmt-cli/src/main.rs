//! `xmt`: leveled terminal output for shell scripts.

use clap::Parser;
use xmt_cli::cli::{Cli, run};
use xmt_cli::{exit_codes, logging};

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            xmt::error!("{err:#}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}
