use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

fn generate_builder_opts(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate-builder-opts"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run generate-builder-opts")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn test_writes_to_stdout_by_default() {
    let input = testdata("1.go.in");
    let output = generate_builder_opts(&["--definition-file", path_arg(&input), "--struct-type-name", "A"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let expected = std::fs::read_to_string(testdata("expected.1.go.out")).expect("expected output");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_boolean_flags_take_values() {
    let input = testdata("1.go.in");
    let output = generate_builder_opts(&[
        "--definition-file",
        path_arg(&input),
        "--struct-type-name",
        "A",
        "--export-option-func-type",
        "false",
        "--generate-for-unexported-fields",
    ]);

    assert!(output.status.success());
    let expected = std::fs::read_to_string(testdata("expected.3.go.out")).expect("expected output");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_boolean_flags_accept_every_form() {
    let input = testdata("1.go.in");
    let expected_default = std::fs::read_to_string(testdata("expected.1.go.out")).expect("expected output");
    let expected_all = std::fs::read_to_string(testdata("expected.3.go.out")).expect("expected output");

    let cases: [(&[&str], &str); 5] = [
        (&["--generate-for-unexported-fields", "false"], &expected_default),
        (&["--generate-for-unexported-fields=false"], &expected_default),
        (&["--ignore-unsupported", "--generate-for-unexported-fields=false"], &expected_default),
        (&["--export-option-func-type=false", "--generate-for-unexported-fields", "true"], &expected_all),
        (&["--export-option-func-type", "false", "--generate-for-unexported-fields=true"], &expected_all),
    ];
    for (flags, expected) in cases {
        let mut args = vec!["--definition-file", path_arg(&input), "--struct-type-name", "A"];
        args.extend_from_slice(flags);
        let output = generate_builder_opts(&args);

        assert!(output.status.success(), "flags {:?}: {}", flags, String::from_utf8_lossy(&output.stderr));
        assert_eq!(String::from_utf8_lossy(&output.stdout), expected, "flags {:?}", flags);
    }
}

#[test]
fn test_boolean_flags_reject_non_bool_values() {
    let input = testdata("1.go.in");
    let output = generate_builder_opts(&[
        "--definition-file",
        path_arg(&input),
        "--struct-type-name",
        "A",
        "--generate-for-unexported-fields=maybe",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_out_file_is_truncated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_file = dir.path().join("setters.go");
    std::fs::write(&out_file, "x".repeat(10_000)).expect("seed out file");

    let input = testdata("13.go.in");
    let output = generate_builder_opts(&[
        "--definition-file",
        path_arg(&input),
        "--struct-type-name",
        "A",
        "--skip-struct-fields",
        "C, D",
        "--out-file",
        path_arg(&out_file),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let expected = std::fs::read_to_string(testdata("expected.8.go.out")).expect("expected output");
    assert_eq!(std::fs::read_to_string(&out_file).expect("out file"), expected);
}

#[test]
fn test_failure_exits_nonzero_with_message() {
    let input = testdata("4.go.in");
    let output = generate_builder_opts(&[
        "--definition-file",
        path_arg(&input),
        "--struct-type-name",
        "A",
        "--ignore-unsupported",
        "false",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("embedded fields disallowed"), "stderr: {}", stderr);
}

#[test]
fn test_missing_definition_file() {
    let output = generate_builder_opts(&["--definition-file", "does/not/exist.go", "--struct-type-name", "A"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read definition file"), "stderr: {}", stderr);
}

#[test]
fn test_required_flags_are_enforced() {
    let output = generate_builder_opts(&["--struct-type-name", "A"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_field_report_as_json() {
    let input = testdata("11.go.in");
    let output = generate_builder_opts(&[
        "--definition-file",
        path_arg(&input),
        "--struct-type-name",
        "A",
        "--print-fields",
        "--json",
    ]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).expect("json report");
    assert_eq!(
        report,
        serde_json::json!([
            {"field": "io.Reader", "field-type": "io.Reader", "verdict": "skip", "reason": "embedded"},
            {"field": "T", "field-type": "time.Time", "verdict": "skip", "reason": "imported"},
            {"field": "B", "field-type": "string", "verdict": "generate"},
            {"field": "c", "field-type": "int", "verdict": "skip", "reason": "unexported"},
        ])
    );
}

#[test]
fn test_manifest_runs_every_job() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy(testdata("1.go.in"), dir.path().join("one.go")).expect("copy fixture");
    std::fs::copy(testdata("14.go.in"), dir.path().join("list.go")).expect("copy fixture");
    let manifest = dir.path().join("jobs.yaml");
    std::fs::write(
        &manifest,
        "jobs:\n  - definition-file: one.go\n    out-file: one_setters.go\n    struct-type-name: A\n    generate-for-unexported-fields: true\n  - definition-file: list.go\n    out-file: list_setters.go\n    struct-type-name: List\n",
    )
    .expect("write manifest");

    let output = generate_builder_opts(&["--manifest", path_arg(&manifest)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let read = |path: PathBuf| std::fs::read_to_string(path).expect("read output");
    assert_eq!(read(dir.path().join("one_setters.go")), read(testdata("expected.2.go.out")));
    assert_eq!(read(dir.path().join("list_setters.go")), read(testdata("expected.9.go.out")));
}

#[test]
fn test_manifest_stops_at_failing_job() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy(testdata("2.go.in"), dir.path().join("bad.go")).expect("copy fixture");
    std::fs::copy(testdata("1.go.in"), dir.path().join("good.go")).expect("copy fixture");
    let manifest = dir.path().join("jobs.yaml");
    std::fs::write(
        &manifest,
        "jobs:\n  - definition-file: bad.go\n    out-file: bad_setters.go\n    struct-type-name: A\n  - definition-file: good.go\n    out-file: good_setters.go\n    struct-type-name: A\n",
    )
    .expect("write manifest");

    let output = generate_builder_opts(&["--manifest", path_arg(&manifest)]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("job 0 (struct 'A') failed"), "stderr: {}", stderr);
    assert!(stderr.contains("could not find struct type 'A'"), "stderr: {}", stderr);
    assert!(!dir.path().join("good_setters.go").exists());
}

#[test]
fn test_manifest_conflicts_with_single_run_flags() {
    let output = generate_builder_opts(&["--manifest", "jobs.yaml", "--struct-type-name", "A"]);
    assert_eq!(output.status.code(), Some(2));
}
