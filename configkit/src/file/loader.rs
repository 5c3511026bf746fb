//! Loading and merging several configuration files.

use camino::Utf8Path;
use tracing::{debug, warn};

use crate::bridge::{MemoryStore, reconstruct};
use crate::merge::merge_into;
use crate::value::Mapping;
use crate::{ConfigkitError, ConfigkitResult};

use super::parser::{load_file, load_yaml_file, source_tcl_file};

/// Options for multi-file loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip inputs that cannot be read or parsed instead of failing.
    pub skip_errors: bool,
}

impl LoadOptions {
    /// Enables or disables skipping of failing inputs.
    #[must_use]
    pub const fn with_skip_errors(mut self, skip: bool) -> Self {
        self.skip_errors = skip;
        self
    }
}

/// Parses YAML files in order and deep-merges them, later files winning.
///
/// Empty documents contribute nothing.
///
/// # Errors
///
/// Returns [`ConfigkitError::NoInputs`] for an empty list and the first
/// file's read or parse error otherwise.
pub fn load_yaml_files<P: AsRef<Utf8Path>>(paths: &[P]) -> ConfigkitResult<Mapping> {
    ensure_inputs(paths)?;
    let mut merged = Mapping::new();
    for path in paths {
        merge_into(&mut merged, &load_yaml_file(path.as_ref())?);
    }
    Ok(merged)
}

/// Sources Tcl scripts in order into one store and rebuilds its mapping.
///
/// A variable set by a later script replaces the earlier value, as in an
/// interpreter that sources each file in turn.
///
/// # Errors
///
/// Returns [`ConfigkitError::NoInputs`] for an empty list, the first
/// script's read or parse error, or a [`ConfigkitError::Bridge`] error when
/// the combined variables cannot be rebuilt.
pub fn load_tcl_files<P: AsRef<Utf8Path>>(paths: &[P]) -> ConfigkitResult<Mapping> {
    ensure_inputs(paths)?;
    let mut store = MemoryStore::new();
    for path in paths {
        source_tcl_file(path.as_ref(), &mut store)?;
    }
    debug!(entries = store.len(), "sourced Tcl scripts");
    Ok(reconstruct(&store)?)
}

/// Loads YAML and Tcl files in order and deep-merges them.
///
/// The format of each file follows its extension. With
/// [`LoadOptions::skip_errors`] any input that fails (missing, unreadable,
/// malformed or of unknown format) is logged and skipped.
///
/// # Errors
///
/// Returns [`ConfigkitError::NoInputs`] for an empty list. Unless errors are
/// skipped, returns the first failing input's error.
pub fn load_files<P: AsRef<Utf8Path>>(
    paths: &[P],
    options: LoadOptions,
) -> ConfigkitResult<Mapping> {
    ensure_inputs(paths)?;
    let mut merged = Mapping::new();
    for path in paths.iter().map(AsRef::as_ref) {
        match load_file(path) {
            Ok(tree) => merge_into(&mut merged, &tree),
            Err(err) if options.skip_errors => {
                warn!(path = %path, error = %err, "skipping configuration input");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(merged)
}

pub(super) const fn ensure_inputs<P>(paths: &[P]) -> ConfigkitResult<()> {
    if paths.is_empty() {
        return Err(ConfigkitError::NoInputs);
    }
    Ok(())
}
