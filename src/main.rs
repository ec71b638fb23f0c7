//! Geekdemy billing CLI

use std::{io, process::ExitCode};

use clap::Parser;
use geekdemy::{config::Cli, logging::init_subscriber, session::run_file};

#[expect(clippy::print_stderr, reason = "CLI reports fatal errors on stderr")]
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };

            if let Err(print_error) = error.print() {
                eprintln!("{print_error}");
            }

            return code;
        }
    };

    if let Err(error) = init_subscriber(&cli.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();

    match run_file(&cli.input, stdout.lock()) {
        Ok(_bill) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
