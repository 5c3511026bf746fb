//! Extension for mapping component errors into `ConfigkitResult` concisely.
//!
//! Component operations return their own error types ([`CodecError`],
//! [`BridgeError`], [`TclError`] and so on). [`ConfigkitResultExt::into_configkit`]
//! lifts any of them into the crate-wide [`ConfigkitResult`] without a
//! hand-written `map_err`.
//!
//! # Examples
//!
//! ```
//! use configkit::{ConfigkitResult, ConfigkitResultExt, Mapping, MemoryStore};
//! use configkit::bridge::project;
//!
//! fn flatten(tree: &Mapping) -> ConfigkitResult<MemoryStore> {
//!     project(tree).into_configkit()
//! }
//! # assert!(flatten(&Mapping::new()).is_ok());
//! ```
//!
//! [`CodecError`]: crate::codec::CodecError
//! [`BridgeError`]: crate::bridge::BridgeError
//! [`TclError`]: crate::tcl::TclError

use crate::{ConfigkitError, ConfigkitResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigkitError>` into a [`ConfigkitResult<T>`].
pub trait ConfigkitResultExt<T> {
    /// Convert `Result<T, E>` into `ConfigkitResult<T>` using `Into<ConfigkitError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion.
    fn into_configkit(self) -> ConfigkitResult<T>;
}

impl<T, E> ConfigkitResultExt<T> for Result<T, E>
where
    E: Into<ConfigkitError>,
{
    fn into_configkit(self) -> ConfigkitResult<T> {
        self.map_err(Into::into)
    }
}
