//! Error types for the `configkit` command.

use camino::Utf8PathBuf;
use configkit::ConfigkitError;
use thiserror::Error;

/// Errors surfaced by the `configkit` command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Configkit(#[from] ConfigkitError),

    #[error(
        "cannot infer the output format of '{0}'; pass --format or use a .tcl, .tk, .yaml or .yml extension"
    )]
    UnknownOutputFormat(Utf8PathBuf),

    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] std::io::Error),
}
