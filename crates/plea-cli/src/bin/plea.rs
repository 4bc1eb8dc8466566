use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use plea_cli::args::CliArgs;
use plea_cli::{driver, trace};

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    trace::init();
    let args = CliArgs::parse();
    match driver::run(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{}: {err:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}
