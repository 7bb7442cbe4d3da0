use clap::ArgMatches;

use crate::config::Config;
use crate::error::Result;
use crate::output::Output;

mod check;
mod contrast;
mod input;
mod serve;

use check::CheckCommand;
use contrast::ContrastCommand;
use serve::ServeCommand;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{CliError, Result, EXIT_FAIL, EXIT_PASS};
    pub use crate::output::Output;

    pub use clap::ArgMatches;
    pub use contrast_checker::Color;

    pub use super::GenericCommand;

    pub use std::io::Write;
}

/// A subcommand. Returns the process exit status.
pub trait GenericCommand {
    fn run(&self, out: &mut Output, matches: &ArgMatches, config: &Config) -> Result<i32>;
}

pub struct Command(Box<dyn GenericCommand>);

impl Command {
    pub fn from_string(command: &str) -> Self {
        match command {
            "check" => Command(Box::new(CheckCommand)),
            "contrast" => Command(Box::new(ContrastCommand)),
            "serve" => Command(Box::new(ServeCommand)),
            _ => unreachable!("Unknown subcommand"),
        }
    }

    pub fn execute(&self, out: &mut Output, matches: &ArgMatches, config: &Config) -> Result<i32> {
        self.0.run(out, matches, config)
    }
}
