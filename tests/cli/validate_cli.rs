use std::fs;
use std::path::PathBuf;

use predicates::prelude::{PredicateBooleanExt, predicate};
use serde_json::Value;
use tempfile::{TempDir, tempdir};

const PERSON_SCHEMA: &str = r#"{
    "type": "object",
    "required": ["name", "age"],
    "properties": {
        "name": {"type": "string"},
        "age": {"type": "integer", "minimum": 0}
    }
}"#;

fn write_fixture(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

fn path_arg(path: &PathBuf) -> &str {
    path.to_str().expect("utf8 path")
}

#[test]
fn help_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--source"))
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("Result format printed on stdout"));
}

#[test]
fn version_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn valid_document_prints_success_and_exits_zero() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: Ada\nage: 36\n");
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(0)
        .stdout("The document is valid\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_property_is_listed_and_exits_one() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.json", r#"{"name": "x"}"#);
    let schema = write_fixture(
        &dir,
        "schema.json",
        r#"{"type":"object","required":["name","age"]}"#,
    );

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "The document is not valid. see errors :\n",
        ))
        .stdout(predicate::str::contains("- (root): "))
        .stdout(predicate::str::contains("age"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn every_violation_gets_its_own_line() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: 7\nage: -1\n");
    let schema = write_fixture(&dir, "schema.json", PERSON_SCHEMA);

    let output = assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    let error_lines: Vec<&str> = stdout.lines().filter(|line| line.starts_with("- ")).collect();
    assert_eq!(error_lines.len(), 2);
    assert!(error_lines.iter().any(|line| line.starts_with("- name: ")));
    assert!(error_lines.iter().any(|line| line.starts_with("- age: ")));
}

#[test]
fn json_output_count_matches_text_lines() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: 7\nage: -1\n");
    let schema = write_fixture(&dir, "schema.json", PERSON_SCHEMA);

    let output = assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args([
            "--source",
            path_arg(&source),
            "--schema",
            path_arg(&schema),
            "--output",
            "json",
        ])
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    assert_eq!(report["valid"], Value::Bool(false));
    assert_eq!(report["error_count"], Value::from(2));
    assert_eq!(report["errors"].as_array().expect("errors array").len(), 2);
}

#[test]
fn yaml_and_json_sources_produce_identical_results() {
    let dir = tempdir().expect("temp dir");
    let yaml_source = write_fixture(&dir, "doc.yaml", "{a: 1}");
    let json_source = write_fixture(&dir, "doc.json", r#"{"a": 1}"#);
    let schema = write_fixture(
        &dir,
        "schema.yaml",
        "type: object\nproperties:\n  a: {type: string}\n",
    );

    let run = |source: &PathBuf| {
        assert_cmd::cargo::cargo_bin_cmd!("docschema")
            .args(["--source", path_arg(source), "--schema", path_arg(&schema)])
            .output()
            .expect("run command")
    };
    let from_yaml = run(&yaml_source);
    let from_json = run(&json_source);

    assert_eq!(from_yaml.status.code(), Some(1));
    assert_eq!(from_yaml.status.code(), from_json.status.code());
    assert_eq!(from_yaml.stdout, from_json.stdout);
}

#[test]
fn missing_both_flags_reports_source_first() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr("--source is required\n");
}

#[test]
fn missing_schema_flag_is_reported() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", "doc.yaml"])
        .assert()
        .code(1)
        .stderr("--schema is required\n");
}

#[test]
fn empty_source_flag_counts_as_missing() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source=", "--schema", "schema.json"])
        .assert()
        .code(1)
        .stderr("--source is required\n");
}

#[test]
fn missing_schema_file_reports_to_stderr_only() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "doc.yaml", "a: 1\n");
    let schema = dir.path().join("absent.schema.json");

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("absent.schema.json"))
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn malformed_source_reports_parse_error() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "doc.yaml", "a: [1, 2\n");
    let schema = write_fixture(&dir, "schema.json", "{}");

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("yaml parse error"));
}

#[test]
fn uncompilable_schema_reports_to_stderr() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "doc.yaml", "a: 1\n");
    let schema = write_fixture(&dir, "schema.json", r#"{"type": 123}"#);

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid schema"));
}

#[test]
fn http_lookalike_reference_is_read_from_disk() {
    let dir = tempdir().expect("temp dir");
    write_fixture(&dir, "http_schema.json", r#"{"type": "object"}"#);
    write_fixture(&dir, "doc.yaml", "a: 1\n");

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .current_dir(dir.path())
        .args(["--source", "doc.yaml", "--schema", "http_schema.json"])
        .assert()
        .code(0)
        .stdout("The document is valid\n");
}

#[test]
fn forced_draft_changes_keyword_semantics() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "doc.json", "10");
    let schema = write_fixture(
        &dir,
        "schema.json",
        r#"{"type": "number", "maximum": 10, "exclusiveMaximum": true}"#,
    );

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args([
            "--source",
            path_arg(&source),
            "--schema",
            path_arg(&schema),
            "--draft",
            "4",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("- (root): "));
}

#[test]
fn unknown_flag_exits_one() {
    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn emit_pipeline_reports_inputs_and_stages() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: Ada\nage: 36\n");
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    let output = assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args([
            "--source",
            path_arg(&source),
            "--schema",
            path_arg(&schema),
            "--emit-pipeline",
        ])
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"The document is valid\n");
    let stderr = String::from_utf8(output.stderr).expect("stderr utf8");
    let pipeline: Value =
        serde_json::from_str(stderr.lines().last().expect("pipeline line")).expect("json");
    assert_eq!(pipeline["command"], Value::from("validate"));
    assert_eq!(pipeline["input"]["sources"][0]["label"], Value::from("source"));
    assert_eq!(pipeline["input"]["sources"][0]["source"], Value::from("path"));
    assert_eq!(pipeline["input"]["sources"][1]["label"], Value::from("schema"));
    assert_eq!(
        pipeline["stage_diagnostics"]
            .as_array()
            .expect("stage diagnostics")
            .len(),
        5
    );
}

#[test]
fn merge_keys_count_toward_required_properties() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(
        &dir,
        "person.yaml",
        "defaults: &defaults\n  age: 36\nperson:\n  <<: *defaults\n  name: Ada\n",
    );
    let schema = write_fixture(
        &dir,
        "schema.json",
        &format!(r#"{{"type":"object","properties":{{"person":{PERSON_SCHEMA}}}}}"#),
    );

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(0)
        .stdout("The document is valid\n");
}

#[test]
fn trailing_document_marker_is_accepted() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: Ada\nage: 36\n---\n");
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(0)
        .stdout("The document is valid\n");
}

#[test]
fn second_document_is_rejected_on_stderr() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "people.yaml", "name: Ada\n---\nname: Bob\n");
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("more than one yaml document"));
}

#[test]
fn verbose_logs_stay_off_stdout() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.yaml", "name: Ada\nage: 36\n");
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    assert_cmd::cargo::cargo_bin_cmd!("docschema")
        .args(["-vv", "--source", path_arg(&source), "--schema", path_arg(&schema)])
        .assert()
        .code(0)
        .stdout("The document is valid\n")
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn closed_stdout_exits_one_without_panicking() {
    let dir = tempdir().expect("temp dir");
    let source = write_fixture(&dir, "person.json", r#"{"name": 1, "age": -1}"#);
    let schema = write_fixture(&dir, "person.schema.json", PERSON_SCHEMA);

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_docschema"))
        .args(["--source", path_arg(&source), "--schema", path_arg(&schema)])
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .expect("spawn docschema");
    drop(child.stdout.take());

    let output = child.wait_with_output().expect("wait for docschema");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}
