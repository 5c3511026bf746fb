//! Command-line interface definitions for `configkit`.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use configkit::file::{LoadOptions, SourceKind};
use configkit::tcl::TclWriteOptions;

/// Output formats `configkit convert` can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A Tcl script of `set` commands.
    Tcl,
    /// A merged YAML document.
    Yaml,
}

impl OutputFormat {
    /// Returns the CLI-friendly string for this output format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcl => "tcl",
            Self::Yaml => "yaml",
        }
    }

    /// Infers the format from the extension of `path`.
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        SourceKind::from_path(path).map(|kind| match kind {
            SourceKind::Yaml => Self::Yaml,
            SourceKind::Tcl => Self::Tcl,
        })
    }
}

/// Parsed CLI arguments for `configkit`.
#[derive(Debug, Parser)]
#[command(name = "configkit")]
#[command(about = "Convert and merge YAML and Tcl configuration files")]
#[command(version)]
pub struct Args {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert YAML and Tcl files into one Tcl script or YAML document.
    Convert(ConvertArgs),
    /// Merge YAML and Tcl files and print the result as YAML.
    Merge(MergeArgs),
}

/// Arguments of `configkit convert`.
#[derive(Debug, ClapArgs)]
pub struct ConvertArgs {
    /// File to write.
    #[arg(long, short, value_name = "path")]
    pub output: Utf8PathBuf,
    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Skip inputs that cannot be read or parsed.
    #[arg(long = "skip-errors")]
    pub should_skip_errors: bool,
    /// Omit the `# From <path>` comment before each input's section.
    #[arg(long = "no-source-comments")]
    pub should_omit_source_comments: bool,
    /// Record leaf types so numeric-looking scalar strings survive a round trip.
    #[arg(long = "type-hints")]
    pub should_record_types: bool,
    /// Input files, applied in order.
    #[arg(required = true, value_name = "input")]
    pub inputs: Vec<Utf8PathBuf>,
}

impl ConvertArgs {
    /// Options for Tcl output.
    pub const fn tcl_options(&self) -> TclWriteOptions {
        TclWriteOptions {
            source_comments: !self.should_omit_source_comments,
            type_hints: self.should_record_types,
            skip_errors: self.should_skip_errors,
        }
    }

    /// Options for YAML output.
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            skip_errors: self.should_skip_errors,
        }
    }
}

/// Arguments of `configkit merge`.
#[derive(Debug, ClapArgs)]
pub struct MergeArgs {
    /// Skip inputs that cannot be read or parsed.
    #[arg(long = "skip-errors")]
    pub should_skip_errors: bool,
    /// Input files, later files taking precedence.
    #[arg(required = true, value_name = "input")]
    pub inputs: Vec<Utf8PathBuf>,
}
