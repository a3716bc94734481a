use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_markers-filter")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

const MARKERS: &str = r#"[
    {"resource": "src/main.rs", "severity": "error", "message": "mismatched types", "line": 10, "column": 5},
    {"resource": "src/lib.rs", "severity": "warning", "message": "unused import", "line": 3, "column": 1},
    {"resource": "README.md", "severity": "info", "message": "line too long", "source": "markdownlint"}
]"#;

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");

    child.wait_with_output().expect("command should finish")
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON document"))
        .collect()
}

#[test]
fn test_json_output_follows_each_line() {
    let dir = tempdir().expect("temp dir");
    let markers = dir.path().join("markers.json");
    write_file(&markers, MARKERS);

    let output = run_with_stdin(
        &["-m", markers.to_str().expect("utf8 path"), "-F", "json"],
        "errors\nwarnings UNUSED\nmarkdown\n",
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let docs = json_lines(&output);
    let counts: Vec<u64> = docs
        .iter()
        .map(|doc| doc["count"].as_u64().expect("count"))
        .collect();
    assert_eq!(counts, vec![3, 1, 1, 1]);
    assert_eq!(docs[1]["filter"]["filter_errors"], true);
    assert_eq!(docs[2]["filter"]["filter_value"], "UNUSED");
    assert_eq!(docs[2]["markers"][0]["resource"], "src/lib.rs");
    assert_eq!(docs[3]["markers"][0]["source"], "markdownlint");
}

#[test]
fn test_localized_keywords_from_messages_file() {
    let dir = tempdir().expect("temp dir");
    let markers = dir.path().join("markers.json");
    let messages = dir.path().join("messages.json5");
    write_file(&markers, MARKERS);
    write_file(
        &messages,
        "{\n  // german bundle\n  \"filter.errors.prefix\": \"fehler\",\n}\n",
    );

    let output = run_with_stdin(
        &[
            "-m",
            markers.to_str().expect("utf8 path"),
            "--messages",
            messages.to_str().expect("utf8 path"),
            "-F",
            "json",
        ],
        "Fehler\n",
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let docs = json_lines(&output);
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1]["count"], 1);
    assert_eq!(docs[1]["markers"][0]["severity"], "error");
}

#[test]
fn test_text_output_shows_summary_and_table() {
    let dir = tempdir().expect("temp dir");
    let markers = dir.path().join("markers.json");
    write_file(&markers, MARKERS);

    let output = run_with_stdin(
        &["-m", markers.to_str().expect("utf8 path"), "--color", "never"],
        "errors\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Showing 3 of 3 problems"), "{}", stdout);
    assert!(stdout.contains("Showing 1 of 3 problems"), "{}", stdout);
    assert!(stdout.contains("severity=errors"), "{}", stdout);
    assert!(stdout.contains("mismatched types"), "{}", stdout);
}

#[test]
fn test_missing_markers_file_fails() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.json");

    let output = run_with_stdin(&["-m", missing.to_str().expect("utf8 path")], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read markers file"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_blank_keyword_in_messages_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let markers = dir.path().join("markers.json");
    let messages = dir.path().join("messages.json5");
    write_file(&markers, MARKERS);
    write_file(&messages, r#"{"filter.infos.prefix": ""}"#);

    let output = run_with_stdin(
        &[
            "-m",
            markers.to_str().expect("utf8 path"),
            "--messages",
            messages.to_str().expect("utf8 path"),
        ],
        "infos\n",
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("filter.infos.prefix"), "stderr: {}", stderr);
}
