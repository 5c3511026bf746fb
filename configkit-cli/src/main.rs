//! CLI entrypoint for `configkit`.

mod cli;
mod error;

use std::io::Write;

use clap::Parser;
use configkit::file::{LoadOptions, files_to_tcl_file, files_to_yaml, files_to_yaml_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, ConvertArgs, MergeArgs, OutputFormat};
use crate::error::CliError;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "CONFIGKIT_LOG";

fn main() -> Result<(), CliError> {
    init_tracing();
    run(Args::parse())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Convert(convert) => run_convert(&convert),
        Command::Merge(merge) => run_merge(&merge),
    }
}

fn run_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let format = resolve_format(args)?;
    match format {
        OutputFormat::Tcl => {
            files_to_tcl_file(&args.inputs, &args.output, args.tcl_options())?;
        }
        OutputFormat::Yaml => {
            files_to_yaml_file(&args.inputs, &args.output, args.load_options())?;
        }
    }
    info!(
        output = %args.output,
        format = format.as_str(),
        inputs = args.inputs.len(),
        "conversion finished"
    );
    Ok(())
}

fn resolve_format(args: &ConvertArgs) -> Result<OutputFormat, CliError> {
    args.format
        .or_else(|| OutputFormat::from_path(&args.output))
        .ok_or_else(|| CliError::UnknownOutputFormat(args.output.clone()))
}

fn run_merge(args: &MergeArgs) -> Result<(), CliError> {
    let options = LoadOptions {
        skip_errors: args.should_skip_errors,
    };
    let document = files_to_yaml(&args.inputs, options)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(CliError::Stdout)
}
