//! Reading and writing the `set`-only Tcl subset.
//!
//! Scripts produced by [`render_script`] and hand-written files in the same
//! style load into a [`MemoryStore`](crate::MemoryStore) through
//! [`parse_script`]. The reader understands comments, blank lines,
//! `;`-separated commands, quoted, braced and bracketed words spanning lines,
//! `set name value` and `array set name {key value ...}`. Variable
//! substitution is not performed: a `$` in a bare word is kept literally.

mod reader;
mod writer;

use thiserror::Error;

use crate::codec::LexError;

pub use reader::{parse_script, source_script};
pub use writer::{SCRIPT_HEADER, ScriptWriter, TclWriteOptions, render_script};

/// Errors raised while reading a Tcl script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TclError {
    /// The script is not well formed.
    #[error("line {line}: {message}")]
    Syntax {
        /// Line the problem was found on.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The script uses a command other than `set` or `array set`.
    #[error("line {line}: unsupported command '{command}'")]
    UnsupportedCommand {
        /// Line the command starts on.
        line: usize,
        /// Name of the command.
        command: String,
    },
}

impl TclError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn from_lex(err: &LexError) -> Self {
        Self::syntax(err.line(), err.to_string())
    }

    /// Line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::UnsupportedCommand { line, .. } => *line,
        }
    }
}
