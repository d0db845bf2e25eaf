//! IPC pipeline CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use ipc_cli::cli::Cli;
use ipc_cli::logging::init_logging;
use ipc_cli::pipeline::run;
use ipc_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    init_logging(
        cli.verbosity.tracing_level_filter(),
        !cli.verbosity.is_present(),
        with_ansi,
    );

    let exit_code = match run(&cli) {
        Ok(result) => {
            print_summary(&result);
            if result.has_errors { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
