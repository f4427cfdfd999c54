//! `slide-fit` command-line front end.
//!
//! Usage:
//!   slide-fit layout deck.html -o deck.json --audit
//!   slide-fit audit deck.json --verbose
//!   slide-fit measure "Some text" --size 14 --width 4.2
//!
//! `RUST_LOG` controls log output (for example `RUST_LOG=slide_fit_layout=debug`).

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Layout(args) => commands::layout(args).map(|()| true),
        Command::Audit(args) => commands::audit(args).map(|clean| clean || !args.strict),
        Command::Measure(args) => commands::measure(args).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
