//! Test helpers shared across crates in the configkit workspace.
//!
//! Provides a temporary workspace fixture for file-based tests and text
//! helpers for comparing generated scripts.

pub mod text;
pub mod workspace;

pub use workspace::TempWorkspace;
