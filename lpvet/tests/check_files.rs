use assert_matches::assert_matches;
use lpvet::batch::{process_paths, BatchConfig};
use lpvet::lexical::FormatError;
use lpvet::pipeline::{process_file, process_source};
use lpvet::{CheckOptions, PipelineError};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const UNDECLARED_Y: &str = "MIN\n obj: x + y\nSUBJECT TO\n c1: x + y <= 1\nGENERAL\n x\nEND\n";
const UNUSED_Z: &str = "MAX\n x\nGENERAL\n x\nBINARY\n z\nEND\n";

fn diagnostics(name: &str, text: &str, warn: bool) -> Vec<String> {
    process_source(name, text, &CheckOptions::with_warnings(warn))
        .unwrap()
        .report
        .diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn write(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

#[test]
fn undeclared_variable_reported_once() {
    assert_eq!(
        diagnostics("a.lp", UNDECLARED_Y, false),
        vec!["a.lp:2: error: no var declaration for y"]
    );
    // x is used, so warnings add nothing
    assert_eq!(
        diagnostics("a.lp", UNDECLARED_Y, true),
        vec!["a.lp:2: error: no var declaration for y"]
    );
}

#[test]
fn unused_binary_needs_warnings() {
    assert_eq!(
        diagnostics("b.lp", UNUSED_Z, true),
        vec!["b.lp:6: warning: no use of binary var z"]
    );
    assert!(diagnostics("b.lp", UNUSED_Z, false).is_empty());
}

#[test]
fn declarations_are_unioned() {
    let text = "min\n a + b + c\nst\n a - b >= 0\ngen\n a\nbin\n b\nsemi\n c\nend\n";
    assert!(diagnostics("u.lp", text, true).is_empty());
}

#[test]
fn bounds_variables_must_be_declared() {
    let text = "min\n x\nbounds\n 0 <= x <= inf\n y >= -inf\ngeneral\n x\n";
    assert_eq!(
        diagnostics("bd.lp", text, false),
        vec!["bd.lp:5: error: no var declaration for y"]
    );
}

#[test]
fn inf_is_a_variable_outside_bounds() {
    let text = "min\n inf\ngeneral\n x\n";
    assert_eq!(
        diagnostics("inf.lp", text, true),
        vec![
            "inf.lp:2: error: no var declaration for inf",
            "inf.lp:4: warning: no use of general var x",
        ]
    );
}

#[test]
fn line_length_boundary() {
    let fits = format!("min\n{}\ngen\n x\n", format!(" x{}", " ".repeat(507)));
    assert_eq!(fits.lines().nth(1).unwrap().len(), 510);
    assert!(process_source("l.lp", &fits, &CheckOptions::default()).is_ok());

    let long = format!("min\n{}\n", format!(" x{}", " ".repeat(508)));
    let error = process_source("l.lp", &long, &CheckOptions::default()).unwrap_err();
    assert_eq!(error.to_string(), "l.lp:2: line too long (511 > 510)");
}

#[test]
fn long_comment_lines_are_still_limited() {
    let text = format!("\\{}\n", "c".repeat(600));
    assert_matches!(
        process_source("c.lp", &text, &CheckOptions::default()),
        Err(PipelineError::Format(FormatError::LineTooLong { length: 601, .. }))
    );
}

#[test]
fn variable_length_boundary() {
    let name = "v".repeat(255);
    let text = format!("min\n {}\ngen\n {}\n", name, name);
    assert!(diagnostics("v.lp", &text, true).is_empty());

    let name = "v".repeat(256);
    let text = format!("min\n {}\n", name);
    assert_matches!(
        process_source("v.lp", &text, &CheckOptions::default()),
        Err(PipelineError::Format(FormatError::VariableTooLong { length: 256, .. }))
    );
}

#[test]
fn star_is_not_a_name_character() {
    let error = process_source("s.lp", "min\n 2 x*y\n", &CheckOptions::default()).unwrap_err();
    assert_eq!(error.to_string(), "s.lp:2: invalid variable name: \"x*y\"");
}

#[test]
fn data_before_any_section() {
    let error = process_source("n.lp", "\\ header\n x + y\n", &CheckOptions::default()).unwrap_err();
    assert_eq!(error.to_string(), "n.lp:2: not in a section");

    let error = process_source("e.lp", "min\n x\nend\n y\n", &CheckOptions::default()).unwrap_err();
    assert_eq!(error.to_string(), "e.lp:4: not in a section");
}

#[test]
fn files_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "disk.lp", "min\r\n x + y\r\ngen\r\n x\r\n");

    let result = process_file(&path, &CheckOptions::default()).unwrap();
    let rendered: Vec<String> = result.report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(rendered, vec![format!("{}:2: error: no var declaration for y", path)]);
    assert_eq!(result.file_metadata.map(|m| m.line_count), Some(4));
}

#[test]
fn latin1_file_is_checked_on_raw_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.lp");

    // A 510-byte comment of Latin-1 text and a token starting with 0xD7
    let mut bytes = b"min\n 2 \xD7x + y\n\\".to_vec();
    bytes.extend(std::iter::repeat(0xE9).take(509));
    bytes.extend_from_slice(b"\ngeneral\n y\n");
    fs::write(&path, &bytes).unwrap();
    let path = path.display().to_string();

    let result = process_file(&path, &CheckOptions::with_warnings(true)).unwrap();
    assert!(result.report.diagnostics.is_empty());
    assert_eq!(result.file_metadata.map(|m| m.non_utf8_lines), Some(2));

    let output = lpvet(&["-warn", &path]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
}

#[test]
fn batch_reports_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "first.lp", UNUSED_Z);
    let missing = dir.path().join("missing.lp").display().to_string();
    let last = write(&dir, "last.lp", UNDECLARED_Y);

    let paths = [last.clone(), missing.clone(), first.clone()];
    let config = BatchConfig::default().with_threads(3).with_warnings(true);
    let results = process_paths(&paths, &config).unwrap();

    let order: Vec<&str> = results.outcomes.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(order, vec![last.as_str(), missing.as_str(), first.as_str()]);
    assert_eq!(results.issued_count(), 2);
    assert_eq!(results.failure_count(), 1);
}

// ============================================================================
// COMMAND LINE
// ============================================================================

fn lpvet(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lpvet"))
        .args(args)
        .env_remove("LPVET_WARN")
        .env_remove("LPVET_LOGGING_MIN_LEVEL")
        .output()
        .unwrap()
}

fn stderr_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_exit_status_follows_diagnostics() {
    let dir = TempDir::new().unwrap();
    let clean = write(&dir, "clean.lp", "max\n x\ngen\n x\n");
    let unused = write(&dir, "unused.lp", UNUSED_Z);

    let output = lpvet(&[&clean]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());

    let output = lpvet(&[&unused]);
    assert_eq!(output.status.code(), Some(0));

    let output = lpvet(&["-warn", &unused]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr_lines(&output),
        vec![format!("lpvet: {}:6: warning: no use of binary var z", unused)]
    );
}

#[test]
fn cli_read_and_format_errors_do_not_set_status() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "bad.lp", "min\n x*y\n");
    let missing = dir.path().join("none.lp").display().to_string();

    let output = lpvet(&[&bad, &missing]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stderr_lines(&output),
        vec![
            format!("lpvet: {}:2: invalid variable name: \"x*y\"", bad),
            format!("lpvet: open {}: no such file or directory", missing),
        ]
    );
}

#[test]
fn cli_usage_errors() {
    assert_eq!(lpvet(&[]).status.code(), Some(2));
    assert_eq!(lpvet(&["-nope", "a.lp"]).status.code(), Some(2));
    assert_eq!(lpvet(&["--threads"]).status.code(), Some(2));
}

#[test]
fn cli_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "j.lp", UNDECLARED_Y);

    let output = lpvet(&["--json", &path]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(record["file"], path.as_str());
    assert_eq!(record["status"], "issues");
    assert_eq!(record["diagnostics"][0]["kind"], "undeclared");
    assert_eq!(record["diagnostics"][0]["value"], "y");
}

#[test]
fn cli_directory_argument() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.lp", UNDECLARED_Y);
    write(&dir, "a.lp", "max\n x\ngen\n x\n");
    write(&dir, "notes.txt", "x + y\n");

    let output = lpvet(&[dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let lines = stderr_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(&format!(
        "{}:2: error: no var declaration for y",
        Path::new("b.lp").display()
    )));
}
