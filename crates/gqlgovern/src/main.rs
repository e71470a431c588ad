#![forbid(unsafe_code)]

mod cli_input;
mod compare;
mod errors;
mod files;
mod lint;
mod output;

use clap::Parser;
use cli_input::{Args, Command};
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(&args.log_level))
        .init();

    let exit_code = match try_main(args) {
        Ok(code) => code,
        Err(error) => {
            output::report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: Args) -> Result<i32, errors::CliError> {
    match args.command {
        Command::Compare(compare_args) => compare::compare(compare_args),
        Command::Lint(lint_args) => lint::lint(lint_args),
    }
}
