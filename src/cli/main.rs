use std::io::{self, Write};
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod output;

use commands::Command;
use config::Config;
use error::{Result, EXIT_ERROR};
use output::{Brush, Output};

const LOG_ENV: &str = "CONTRAST_CHECKER_LOG";
const COLOR_MODE_ENV: &str = "CONTRAST_CHECKER_COLOR_MODE";

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(match verbosity {
                0 => "warn",
                1 => "info",
                _ => "debug",
            })
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn colors_enabled(mode: &str, interactive_mode: bool) -> bool {
    let mode = match std::env::var(COLOR_MODE_ENV) {
        Ok(env_mode) if mode == "auto" => env_mode,
        _ => mode.to_string(),
    };
    match mode.as_str() {
        "24bit" => true,
        "off" => false,
        _ => interactive_mode,
    }
}

fn run() -> Result<i32> {
    let global_matches = cli::build_cli().get_matches();
    init_logging(global_matches.get_count("verbose"));

    let interactive_mode = atty::is(atty::Stream::Stdout);
    let color_mode = global_matches
        .get_one::<String>("color-mode")
        .map(String::as_str)
        .unwrap_or("auto");

    let config = Config {
        interactive_mode,
        brush: Brush::from_environment(colors_enabled(color_mode, interactive_mode)),
    };

    if let Some((subcommand, matches)) = global_matches.subcommand() {
        // not locked: the MCP transport writes to stdout from its own thread
        let mut stdout = io::stdout();
        let mut out = Output::new(&mut stdout);

        let exit_code = Command::from_string(subcommand).execute(&mut out, matches, &config)?;
        out.handle.flush()?;
        Ok(exit_code)
    } else {
        unreachable!("Subcommand is required")
    }
}

fn main() {
    let exit_code = match run() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            debug!(%err, "command failed");
            eprintln!("{}: error: {}", clap::crate_name!(), err);
            EXIT_ERROR
        }
    };

    process::exit(exit_code);
}
