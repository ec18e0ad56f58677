#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use enumgen_cli::args::{CLI_LONG_FLAGS, CliArgs, preprocess_args};
use enumgen_cli::driver;
use enumgen_cli::reporter::Reporter;

fn main() -> ExitCode {
    // Initialize tracing if ENUMGEN_LOG or RUST_LOG is set.
    enumgen_cli::tracing_config::init_tracing(None);

    let raw: Vec<OsString> = std::env::args_os().collect();
    let command = raw
        .iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    let args = CliArgs::parse_from(preprocess_args(raw, CLI_LONG_FLAGS));
    let reporter = Reporter::new(!args.no_color && std::io::stderr().is_terminal());

    match run(&args, command, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", reporter.format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, command: String, reporter: &Reporter) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::generate(args, command, &cwd)?;
    for unit in result.invalid_units() {
        eprintln!("{}", reporter.format_invalid_unit(unit));
    }
    Ok(())
}
