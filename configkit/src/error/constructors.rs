//! Constructors for `ConfigkitError` variants that carry context.

use std::error::Error as StdError;

use camino::Utf8Path;

use super::ConfigkitError;

impl ConfigkitError {
    /// Builds a [`ConfigkitError::SourceFormat`] for the source named `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// use configkit::ConfigkitError;
    ///
    /// let err = ConfigkitError::source_format("inline", "top level is a list");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid configuration in 'inline': top level is a list"
    /// );
    /// ```
    #[must_use]
    pub fn source_format(
        origin: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::SourceFormat {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Builds a [`ConfigkitError::File`] for an I/O failure on `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Builds a [`ConfigkitError::UnsupportedFormat`] for `path`.
    #[must_use]
    pub fn unsupported_format(path: &Utf8Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    /// Whether the error stems from a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::File { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
