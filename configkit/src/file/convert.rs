//! Multi-file conversions to a single Tcl script or YAML document.

use camino::Utf8Path;
use tracing::{debug, warn};

use crate::bridge::{MemoryStore, ProjectOptions, project_with};
use crate::tcl::{ScriptWriter, TclWriteOptions};
use crate::yaml::to_yaml_string;
use crate::{ConfigkitError, ConfigkitResult};

use super::helpers::{display_path, write_text_file};
use super::loader::{LoadOptions, ensure_inputs, load_files};
use super::parser::{SourceKind, load_tcl_store, load_yaml_file};

/// First line of generated YAML documents.
pub const YAML_HEADER: &str = "# Generated by configkit";

const EMPTY_INPUT_MARKER: &str = "(Empty file - no variables defined)";

/// Renders every input as one Tcl script.
///
/// Inputs are written one after another rather than merged, so a later file
/// overrides an earlier one only when the script is sourced. YAML inputs are
/// projected; Tcl inputs are re-rendered in canonical form. Inputs with an
/// unknown extension are noted in a comment and skipped, as are failing
/// inputs when [`TclWriteOptions::skip_errors`] is set.
///
/// # Errors
///
/// Returns [`ConfigkitError::NoInputs`] for an empty list. Unless errors are
/// skipped, returns the first read, parse or projection error.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use configkit::file::files_to_tcl;
/// use configkit::tcl::TclWriteOptions;
///
/// let script = files_to_tcl(&[Utf8Path::new("base.yaml")], TclWriteOptions::default())?;
/// assert!(script.starts_with("# Generated by configkit"));
/// # Ok::<_, configkit::ConfigkitError>(())
/// ```
pub fn files_to_tcl<P: AsRef<Utf8Path>>(
    paths: &[P],
    options: TclWriteOptions,
) -> ConfigkitResult<String> {
    ensure_inputs(paths)?;
    let project = ProjectOptions::default().with_type_hints(options.type_hints);
    let mut writer = ScriptWriter::new();
    for (index, path) in paths.iter().map(AsRef::as_ref).enumerate() {
        if index > 0 {
            writer.blank_line();
        }
        if options.source_comments {
            writer.comment(&format!("From {}", display_path(path)));
        }
        let Some(kind) = SourceKind::from_path(path) else {
            warn!(path = %path, "skipping input with unknown extension");
            writer.comment(&format!(
                "Skipping file with unknown extension: {}",
                path.extension().unwrap_or_default()
            ));
            continue;
        };
        let store = match section_store(path, kind, project) {
            Ok(store) => store,
            Err(err) if options.skip_errors => {
                warn!(path = %path, error = %err, "skipping configuration input");
                writer.comment(&format!("Error loading {} file: {err}", kind.as_str()));
                continue;
            }
            Err(err) => return Err(err),
        };
        if store.is_empty() {
            writer.comment(EMPTY_INPUT_MARKER);
        } else {
            writer.store(&store);
        }
    }
    Ok(writer.finish())
}

fn section_store(
    path: &Utf8Path,
    kind: SourceKind,
    options: ProjectOptions,
) -> ConfigkitResult<MemoryStore> {
    match kind {
        SourceKind::Yaml => {
            let tree = load_yaml_file(path)?;
            project_with(&tree, options)
                .map_err(|err| ConfigkitError::source_format(path.as_str(), err))
        }
        SourceKind::Tcl => load_tcl_store(path),
    }
}

/// Loads and merges every input, then renders the result as YAML.
///
/// # Errors
///
/// See [`load_files`]; emission failures are reported as
/// [`ConfigkitError::YamlEmit`].
pub fn files_to_yaml<P: AsRef<Utf8Path>>(
    paths: &[P],
    options: LoadOptions,
) -> ConfigkitResult<String> {
    let tree = load_files(paths, options)?;
    let body = to_yaml_string(&tree)?;
    Ok(format!("{YAML_HEADER}\n{body}"))
}

/// Converts `paths` with [`files_to_tcl`] and writes the script to `output`.
///
/// # Errors
///
/// See [`files_to_tcl`]; write failures are reported as
/// [`ConfigkitError::File`]. Nothing is written when conversion fails.
pub fn files_to_tcl_file<P: AsRef<Utf8Path>>(
    paths: &[P],
    output: &Utf8Path,
    options: TclWriteOptions,
) -> ConfigkitResult<()> {
    let script = files_to_tcl(paths, options)?;
    write_text_file(output, &script)?;
    debug!(output = %output, inputs = paths.len(), "wrote Tcl script");
    Ok(())
}

/// Converts `paths` with [`files_to_yaml`] and writes the document to `output`.
///
/// # Errors
///
/// See [`files_to_yaml`]; write failures are reported as
/// [`ConfigkitError::File`]. Nothing is written when conversion fails.
pub fn files_to_yaml_file<P: AsRef<Utf8Path>>(
    paths: &[P],
    output: &Utf8Path,
    options: LoadOptions,
) -> ConfigkitResult<()> {
    let document = files_to_yaml(paths, options)?;
    write_text_file(output, &document)?;
    debug!(output = %output, inputs = paths.len(), "wrote YAML document");
    Ok(())
}
