//! Loading and merging coverage for YAML and Tcl inputs.

use anyhow::{Result, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::TempWorkspace;

use super::to_anyhow;
use crate::ConfigkitError;
use crate::file::{
    LoadOptions, SourceKind, load_file, load_files, load_tcl_files, load_yaml_file,
    load_yaml_files,
};
use crate::value::{Mapping, mapping_from_json};

#[fixture]
fn workspace() -> TempWorkspace {
    TempWorkspace::new().expect("create temporary workspace")
}

#[rstest]
fn yaml_files_merge_in_order(workspace: TempWorkspace) -> Result<()> {
    let base = workspace.write("base.yaml", "a: 1\nb:\n  x: 1\n  y: 2\nlist: [1, 2]\n")?;
    let site = workspace.write("site.yml", "b:\n  y: 20\n  z: 30\nlist: [3]\n")?;
    let merged = to_anyhow(load_yaml_files(&[base, site]))?;
    ensure!(
        merged == mapping_from_json(json!({"a": 1, "b": {"x": 1, "y": 20, "z": 30}, "list": [3]})),
        "unexpected merge result: {merged:?}"
    );
    Ok(())
}

#[rstest]
fn empty_yaml_files_contribute_nothing(workspace: TempWorkspace) -> Result<()> {
    let empty = workspace.write("empty.yaml", "# nothing here\n")?;
    let base = workspace.write("base.yaml", "a: 1\n")?;
    let merged = to_anyhow(load_yaml_files(&[base, empty]))?;
    ensure!(merged == mapping_from_json(json!({"a": 1})), "{merged:?}");
    Ok(())
}

#[rstest]
fn missing_yaml_file_is_a_file_error(workspace: TempWorkspace) {
    let err = load_yaml_file(&workspace.path("absent.yaml")).expect_err("file is missing");
    assert!(err.is_not_found(), "unexpected error: {err:?}");
}

#[rstest]
fn no_inputs_are_rejected() {
    let none: [Utf8PathBuf; 0] = [];
    assert!(matches!(load_yaml_files(&none), Err(ConfigkitError::NoInputs)));
    assert!(matches!(load_tcl_files(&none), Err(ConfigkitError::NoInputs)));
    assert!(matches!(
        load_files(&none, LoadOptions::default()),
        Err(ConfigkitError::NoInputs)
    ));
}

#[rstest]
fn tcl_files_share_one_interpreter(workspace: TempWorkspace) -> Result<()> {
    let first = workspace.write(
        "first.tcl",
        "set server(host) \"localhost\"\nset server(port) 8080\n",
    )?;
    let second = workspace.write("second.tk", "set server(port) 9090\nset debug true\n")?;
    let tree = to_anyhow(load_tcl_files(&[first, second]))?;
    ensure!(
        tree == mapping_from_json(json!({
            "server": {"host": "localhost", "port": 9090},
            "debug": true
        })),
        "unexpected tree: {tree:?}"
    );
    Ok(())
}

#[rstest]
fn tcl_conflicts_across_files_are_reported(workspace: TempWorkspace) -> Result<()> {
    let first = workspace.write("first.tcl", "set a 1\n")?;
    let second = workspace.write("second.tcl", "set a(b) 2\n")?;
    let err = load_tcl_files(&[first, second]).expect_err("paths conflict");
    ensure!(
        matches!(err, ConfigkitError::Bridge(_)),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn mixed_inputs_merge_by_extension(workspace: TempWorkspace) -> Result<()> {
    let yaml = workspace.write("base.yaml", "server:\n  host: localhost\n  port: 8080\n")?;
    let tcl = workspace.write("override.tcl", "set server(port) 9000\n")?;
    let tree = to_anyhow(load_files(&[yaml, tcl], LoadOptions::default()))?;
    ensure!(
        tree == mapping_from_json(json!({"server": {"host": "localhost", "port": 9000}})),
        "unexpected tree: {tree:?}"
    );
    Ok(())
}

#[rstest]
fn failing_inputs_stop_loading_by_default(workspace: TempWorkspace) -> Result<()> {
    let good = workspace.write("good.yaml", "a: 1\n")?;
    let bad = workspace.write("bad.yaml", "a: [1\n")?;
    let err = load_files(&[good, bad], LoadOptions::default()).expect_err("bad YAML");
    ensure!(
        matches!(err, ConfigkitError::SourceFormat { .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn skip_errors_ignores_failing_inputs(workspace: TempWorkspace) -> Result<()> {
    let good = workspace.write("good.yaml", "a: 1\n")?;
    let bad = workspace.write("bad.tcl", "puts hello\n")?;
    let unknown = workspace.write("notes.txt", "a = 2\n")?;
    let missing = workspace.path("missing.yaml");
    let later = workspace.write("later.yml", "b: 2\n")?;
    let options = LoadOptions::default().with_skip_errors(true);
    let tree = to_anyhow(load_files(&[good, bad, unknown, missing, later], options))?;
    ensure!(tree == mapping_from_json(json!({"a": 1, "b": 2})), "{tree:?}");
    Ok(())
}

#[rstest]
fn unknown_extensions_are_rejected(workspace: TempWorkspace) -> Result<()> {
    let path = workspace.write("conf.toml", "a = 1\n")?;
    ensure!(SourceKind::from_path(&path).is_none());
    let err = load_file(&path).expect_err("toml is unsupported");
    ensure!(
        matches!(err, ConfigkitError::UnsupportedFormat { .. }),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn tcl_syntax_errors_name_the_file(workspace: TempWorkspace) -> Result<()> {
    let path = workspace.write("broken.tcl", "set a {open\n")?;
    let err = load_file(&path).expect_err("unterminated brace");
    ensure!(
        matches!(&err, ConfigkitError::SourceFormat { origin, .. } if origin.ends_with("broken.tcl")),
        "unexpected error: {err:?}"
    );
    let skipped = to_anyhow(load_files(
        &[path],
        LoadOptions::default().with_skip_errors(true),
    ))?;
    ensure!(skipped == Mapping::new(), "{skipped:?}");
    Ok(())
}
