use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

const THREE_LINES: &str = "1\t2\n1\t3\n2\t3\n";

const THREE_LINE_REPORT: &str = "# T : 3\n# N : 3\n# E : 6\n\n\
# column1: k\n\
# column2: A_k (with Thong Pham's correction)\n\
# column3: A_k (without correction)\n\n\
1\t1\t1\n\
2\t0\t0\n";

fn kernel_estimate(args: &[&str], stdin: &str) -> Output {
    kernel_estimate_logging(args, stdin, "warn")
}

fn kernel_estimate_logging(args: &[&str], stdin: &str, log: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kernel-estimate"))
        .args(args)
        .env("RUST_LOG", log)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn kernel-estimate");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn missing_column_prints_usage_and_fails() {
    let out = kernel_estimate(&[], THREE_LINES);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("usage:"));
}

#[test]
fn non_numeric_column_fails() {
    let out = kernel_estimate(&["two"], THREE_LINES);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn three_line_stream_matches_reference_output() {
    for strategy in ["fast", "naive"] {
        let out = kernel_estimate(&["0", "--strategy", strategy], THREE_LINES);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(String::from_utf8(out.stdout).unwrap(), THREE_LINE_REPORT);
    }
}

#[test]
fn metadata_columns_and_comments_are_ignored() {
    let input = "# exported 2021\n\nmon\tx\t1\t2\n\ntue\ty\t1\t3\nwed\tz\t2\t3\n";
    let out = kernel_estimate(&["2"], input);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), THREE_LINE_REPORT);
}

#[test]
fn malformed_line_aborts_with_its_number() {
    let out = kernel_estimate(&["1"], "a\t1\nb\t2\nlonely\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("line 3"));
}

#[test]
fn empty_stream_reports_counters_then_fails() {
    let out = kernel_estimate(&["0"], "# nothing here\n");
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("# T : 0\n# N : 0\n# E : 0\n"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("insufficient data"));
}

#[test]
fn json_output_carries_summary_and_rows() {
    let out = kernel_estimate(&["0", "--format", "json"], THREE_LINES);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["summary"]["steps"], 3);
    assert_eq!(v["summary"]["edges"], 6);
    assert_eq!(v["rows"].as_array().unwrap().len(), 2);
    assert_eq!(v["rows"][0]["class"], 1);
}

#[test]
fn ids_above_the_default_bound_are_rejected() {
    // one past 1 << 26
    let out = kernel_estimate(&["0"], "1\t2\n67108865\n");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2: node id 67108865 exceeds"), "{stderr}");
}

#[test]
fn max_node_id_flag_sets_the_bound() {
    let out = kernel_estimate(&["0", "--max-node-id", "2"], THREE_LINES);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("node id 3 exceeds"));

    let out = kernel_estimate(&["0", "--max-node-id", "3"], THREE_LINES);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), THREE_LINE_REPORT);
}

#[test]
fn progress_lines_are_plain_text_on_redirected_stderr() {
    let out = kernel_estimate_logging(&["0", "--progress-every", "1"], THREE_LINES, "info");
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(!stderr.contains('\x1b'), "{stderr:?}");
    let progress: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| l.ends_with("(3)"))
        .collect();
    assert_eq!(progress, vec!["1 (3)", "2 (3)", "3 (3)"]);
}

#[test]
fn config_without_column_is_rejected() {
    let mut cfg = NamedTempFile::new().unwrap();
    write!(cfg, r#"{{ "strategy": "naive" }}"#).unwrap();
    cfg.flush().unwrap();
    let path = cfg.path().to_str().unwrap();

    let out = kernel_estimate(&["--config", path], THREE_LINES);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing field `column`"));

    fs::write(cfg.path(), r#"{ "column": 0, "strategy": "naive" }"#).unwrap();
    let out = kernel_estimate(&["--config", path], THREE_LINES);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), THREE_LINE_REPORT);
}
