//! Format detection and per-format parsing of configuration files.

use camino::Utf8Path;
use tracing::debug;

use crate::bridge::{MemoryStore, reconstruct};
use crate::tcl::{parse_script, source_script};
use crate::value::Mapping;
use crate::yaml::parse_yaml_from;
use crate::{ConfigkitError, ConfigkitResult};

use super::helpers::read_text;

/// Source formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.tcl` or `.tk`.
    Tcl,
}

impl SourceKind {
    /// Detects the format from the extension of `path`, ignoring case.
    ///
    /// ```rust
    /// use camino::Utf8Path;
    /// use configkit::file::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_path(Utf8Path::new("site.YML")), Some(SourceKind::Yaml));
    /// assert_eq!(SourceKind::from_path(Utf8Path::new("setup.tk")), Some(SourceKind::Tcl));
    /// assert_eq!(SourceKind::from_path(Utf8Path::new("conf.toml")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("tcl" | "tk") => Some(Self::Tcl),
            _ => None,
        }
    }

    /// Short name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Tcl => "Tcl",
        }
    }

    /// Like [`SourceKind::from_path`] but failing for unknown extensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigkitError::UnsupportedFormat`] for unknown extensions.
    pub fn require(path: &Utf8Path) -> ConfigkitResult<Self> {
        Self::from_path(path).ok_or_else(|| ConfigkitError::unsupported_format(path))
    }
}

/// Reads and parses a YAML file.
///
/// # Errors
///
/// Returns [`ConfigkitError::File`] when the file cannot be read and
/// [`ConfigkitError::SourceFormat`] when it is not a YAML mapping.
pub fn load_yaml_file(path: &Utf8Path) -> ConfigkitResult<Mapping> {
    let text = read_text(path)?;
    debug!(path = %path, bytes = text.len(), "loading YAML file");
    parse_yaml_from(path.as_str(), &text)
}

/// Reads a Tcl script into a fresh store.
///
/// # Errors
///
/// Returns [`ConfigkitError::File`] when the file cannot be read and
/// [`ConfigkitError::SourceFormat`] wrapping the script error otherwise.
pub fn load_tcl_store(path: &Utf8Path) -> ConfigkitResult<MemoryStore> {
    let text = read_text(path)?;
    debug!(path = %path, bytes = text.len(), "loading Tcl script");
    parse_script(&text).map_err(|err| ConfigkitError::source_format(path.as_str(), err))
}

/// Sources a Tcl script into `store`, later assignments winning.
///
/// # Errors
///
/// See [`load_tcl_store`]. The store is unchanged on failure.
pub fn source_tcl_file(path: &Utf8Path, store: &mut MemoryStore) -> ConfigkitResult<()> {
    let text = read_text(path)?;
    debug!(path = %path, bytes = text.len(), "sourcing Tcl script");
    source_script(&text, store).map_err(|err| ConfigkitError::source_format(path.as_str(), err))
}

/// Reads a Tcl script and rebuilds the mapping its variables describe.
///
/// # Errors
///
/// See [`load_tcl_store`]; reconstruction failures are reported as
/// [`ConfigkitError::SourceFormat`] for the script.
pub fn load_tcl_file(path: &Utf8Path) -> ConfigkitResult<Mapping> {
    let store = load_tcl_store(path)?;
    reconstruct(&store).map_err(|err| ConfigkitError::source_format(path.as_str(), err))
}

/// Loads one file of either format into a mapping.
///
/// # Errors
///
/// Returns [`ConfigkitError::UnsupportedFormat`] for unknown extensions and
/// the errors of [`load_yaml_file`] or [`load_tcl_file`] otherwise.
pub fn load_file(path: &Utf8Path) -> ConfigkitResult<Mapping> {
    match SourceKind::require(path)? {
        SourceKind::Yaml => load_yaml_file(path),
        SourceKind::Tcl => load_tcl_file(path),
    }
}
