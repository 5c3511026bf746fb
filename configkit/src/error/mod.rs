//! Error types produced by configuration conversions.

mod constructors;
mod types;

pub use types::{ConfigkitError, ConfigkitResult};
