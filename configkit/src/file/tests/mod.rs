//! Shared helpers for file module tests along with focused submodules.

use anyhow::{Result, anyhow};

mod loader_tests;

pub(super) fn to_anyhow<T>(result: crate::ConfigkitResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}
