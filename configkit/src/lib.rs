//! Core crate for `configkit`: configuration conversion between nested
//! mappings, YAML documents and Tcl array scripts.
//!
//! The crate is organised leaf to root:
//! - [`codec`] encodes single leaf values as Tcl words and decodes them back;
//! - [`path`] converts key paths to and from composite keys such as
//!   `server(settings,timeout)`;
//! - [`merge`] deep-merges mappings, later sources winning;
//! - [`bridge`] projects a mapping onto an [`ArrayStore`] and reconstructs it;
//! - [`yaml`], [`tcl`] and [`file`] adapt text and files to those operations.
//!
//! # Examples
//!
//! ```rust
//! use configkit::{merge, project, reconstruct, tcl::render_script, yaml::parse_yaml};
//!
//! let base = parse_yaml("server:\n  host: localhost\n  port: 8080\n")?;
//! let site = parse_yaml("server:\n  port: 9090\n")?;
//! let merged = merge([&base, &site]);
//!
//! let store = project(&merged)?;
//! assert_eq!(
//!     render_script(&store),
//!     "# Generated by configkit\n\nset server(host) \"localhost\"\nset server(port) 9090\n"
//! );
//! assert_eq!(reconstruct(&store)?, merged);
//! # Ok::<_, configkit::ConfigkitError>(())
//! ```

pub mod bridge;
pub mod codec;
mod error;
pub mod file;
pub mod merge;
pub mod path;
mod result_ext;
pub mod tcl;
mod value;
pub mod yaml;

pub use bridge::{ArrayStore, BridgeError, MemoryStore, ProjectOptions, project, reconstruct};
pub use codec::{CodecError, TypeTag};
pub use error::{ConfigkitError, ConfigkitResult};
pub use merge::{merge, merge_into};
pub use path::{CompositeKey, KeyPath, PathError};
pub use result_ext::ConfigkitResultExt;
pub use tcl::TclError;
pub use value::{ConfigValue, Mapping, Number, mapping_from_json};
