//! File adapters: loading YAML and Tcl files and converting between them.
//!
//! Paths are UTF-8 ([`camino`]) and files are accessed through `cap-std`
//! directory handles. Formats are chosen by extension: `.yaml`/`.yml` for
//! YAML and `.tcl`/`.tk` for Tcl.

mod convert;
mod helpers;
mod loader;
mod parser;

pub use convert::{YAML_HEADER, files_to_tcl, files_to_tcl_file, files_to_yaml, files_to_yaml_file};
pub use helpers::{read_text, write_text_file};
pub use loader::{LoadOptions, load_files, load_tcl_files, load_yaml_files};
pub use parser::{
    SourceKind, load_file, load_tcl_file, load_tcl_store, load_yaml_file, source_tcl_file,
};

#[cfg(test)]
mod tests;
