//! Primary error enum for conversion flows.

use std::error::Error as StdError;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::bridge::BridgeError;
use crate::codec::CodecError;
use crate::path::PathError;
use crate::tcl::TclError;

/// Errors that can occur while converting or merging configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigkitError {
    /// A leaf value could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A key path or composite key is malformed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Projection onto, or reconstruction from, a store failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A Tcl script could not be read.
    #[error("Tcl script error: {0}")]
    Tcl(#[from] TclError),

    /// A source document is not valid YAML or Tcl, or does not hold a mapping.
    #[error("invalid configuration in '{origin}': {source}")]
    SourceFormat {
        /// File path or other label identifying the source.
        origin: String,
        /// Underlying parser or bridge error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A file could not be read or written.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A mapping could not be serialised as YAML.
    #[error("failed to emit YAML: {0}")]
    YamlEmit(#[from] serde_yaml::Error),

    /// An operation that needs input files received none.
    #[error("at least one input file must be provided")]
    NoInputs,

    /// A file extension does not name a supported format.
    #[error("unsupported file format for '{path}': expected .yaml, .yml, .tcl or .tk")]
    UnsupportedFormat {
        /// Offending path.
        path: Utf8PathBuf,
    },
}

/// Result alias used throughout the crate.
pub type ConfigkitResult<T> = Result<T, ConfigkitError>;
