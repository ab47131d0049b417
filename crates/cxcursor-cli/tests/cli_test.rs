//! Integration tests for the cxcursor binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cxcursor_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cxcursor"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_inspect_text() {
    cxcursor_cmd()
        .arg("inspect")
        .arg(fixture("pair.cxu.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unit pair.cpp (7 declarations)"))
        .stdout(predicate::str::contains(
            "decl#5 Pair: ClassTemplatePartialSpecialization",
        ))
        .stdout(predicate::str::contains("  produces: StructDecl"))
        .stdout(predicate::str::contains("    private Tag"));
}

#[test]
fn test_inspect_json_single_decl() {
    let output = cxcursor_cmd()
        .args(["inspect", "--format", "json", "--decl", "Pair"])
        .arg(fixture("pair.cxu.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let decls = report["decls"].as_array().unwrap();
    assert_eq!(decls.len(), 4);

    let full = &decls[3];
    assert_eq!(full["kind"], "StructDecl");
    assert_eq!(full["specialized_from"], "Pair (ClassTemplate)");
    assert_eq!(full["arguments"][1]["kind"], "Type");
    assert_eq!(full["arguments"][1]["spelling"], "bool");
    assert_eq!(full["bases"][0]["access"], "private");

    let partial = &decls[2];
    assert_eq!(partial["template_class"], "class partial specialization");
    assert_eq!(partial["parameters"][0], "A (TemplateTypeParameter)");
}

#[test]
fn test_check_reports_each_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let json = temp_dir.path().join("ns.json");
    fs::write(
        &json,
        r#"{ "unit": { "name": "ns.cpp" }, "decl": [{ "id": "ns", "kind": "namespace" }] }"#,
    )
    .unwrap();

    cxcursor_cmd()
        .arg("check")
        .arg(fixture("pair.cxu.toml"))
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("pair.cxu.toml: OK (7 declarations)"))
        .stdout(predicate::str::contains("ns.json: OK (1 declarations)"));
}

#[test]
fn test_check_fails_on_unknown_reference() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(
        &path,
        "[unit]\nname = \"broken.cpp\"\n\n[[decl]]\nid = \"x\"\nkind = \"namespace\"\nparent = \"nowhere\"\n",
    )
    .unwrap();

    cxcursor_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml: Error"))
        .stderr(predicate::str::contains("nowhere"));
}
