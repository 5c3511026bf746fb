//! End-to-end conversions between YAML and Tcl files on disk.

use anyhow::{Result, ensure};
use configkit::file::{
    LoadOptions, files_to_tcl_file, files_to_yaml_file, load_files, load_tcl_files,
};
use configkit::tcl::TclWriteOptions;
use configkit::{ConfigkitError, mapping_from_json};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::TempWorkspace;
use test_helpers::text::script_lines;

#[fixture]
fn workspace() -> TempWorkspace {
    TempWorkspace::new().expect("create temporary workspace")
}

#[rstest]
fn yaml_to_tcl_and_back(workspace: TempWorkspace) -> Result<()> {
    let base = workspace.write(
        "config/base.yaml",
        "server:\n  host: localhost\n  port: 8080\n  settings:\n    timeout: 30\n    debug: true\n",
    )?;
    let output = workspace.path("config/out.tcl");
    files_to_tcl_file(&[&base], &output, TclWriteOptions::default())?;

    let script = workspace.read("config/out.tcl")?;
    ensure!(
        script_lines(&script)
            == [
                r#"set server(host) "localhost""#,
                "set server(port) 8080",
                "set server(settings,timeout) 30",
                "set server(settings,debug) true",
            ],
        "unexpected script:\n{script}"
    );

    let tree = load_tcl_files(&[&output])?;
    ensure!(
        tree == mapping_from_json(json!({
            "server": {
                "host": "localhost",
                "port": 8080,
                "settings": {"timeout": 30, "debug": true}
            }
        })),
        "unexpected tree: {tree:?}"
    );
    Ok(())
}

#[rstest]
fn yaml_lists_of_mappings_survive_tcl(workspace: TempWorkspace) -> Result<()> {
    let base = workspace.write(
        "servers.yaml",
        "servers:\n  - name: a\n    port: 1\n  - name: b\n",
    )?;
    let output = workspace.path("servers.tcl");
    files_to_tcl_file(&[&base], &output, TclWriteOptions::default())?;

    let script = workspace.read("servers.tcl")?;
    ensure!(
        script_lines(&script)
            == [r#"set servers [list [dict create "name" "a" "port" 1] [dict create "name" "b"]]"#],
        "unexpected script:\n{script}"
    );

    let tree = load_tcl_files(&[&output])?;
    ensure!(
        tree == mapping_from_json(json!({"servers": [{"name": "a", "port": 1}, {"name": "b"}]})),
        "unexpected tree: {tree:?}"
    );
    Ok(())
}

#[rstest]
fn mixed_inputs_merge_into_yaml(workspace: TempWorkspace) -> Result<()> {
    let defaults = workspace.write("defaults.yaml", "log:\n  level: info\n  targets: [stdout]\n")?;
    let legacy = workspace.write(
        "legacy.tcl",
        "# site overrides\nset log(level) debug\nset log(targets) [list file syslog]\n",
    )?;
    let output = workspace.path("merged.yaml");
    files_to_yaml_file(&[&defaults, &legacy], &output, LoadOptions::default())?;

    let merged = load_files(&[&output], LoadOptions::default())?;
    ensure!(
        merged == mapping_from_json(json!({"log": {"level": "debug", "targets": ["file", "syslog"]}})),
        "unexpected merge: {merged:?}"
    );
    Ok(())
}

#[rstest]
fn conflicting_tcl_paths_fail_the_load(workspace: TempWorkspace) -> Result<()> {
    let script = workspace.write("conflict.tcl", "set a(b) 1\nset a 2\n")?;
    let result = load_tcl_files(&[&script]);
    ensure!(
        matches!(result, Err(ConfigkitError::Bridge(_))),
        "unexpected result: {result:?}"
    );
    Ok(())
}
