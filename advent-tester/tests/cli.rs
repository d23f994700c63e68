use std::path::PathBuf;
use std::process::Command;

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "advent-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn questions_dir(count: u8) -> PathBuf {
    let dir = temp_path(&format!("content-{count}"));
    std::fs::create_dir_all(&dir).expect("create content dir");
    let entries: Vec<String> = (1..=count)
        .map(|n| format!("{{\"day\":{n},\"question\":\"Question {n}\"}}"))
        .collect();
    std::fs::write(dir.join("questions.json"), format!("[{}]", entries.join(",")))
        .expect("write questions");
    dir
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_advent-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("unlock-boundary"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_advent-tester");
    let output_path = temp_path("scenarios");
    let output = Command::new(exe)
        .args(["--report", "json", "--scenarios", "all", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Advent Calendar Tester"));
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path).expect("read output"))
            .expect("json report");
    let results = report.as_array().expect("array");
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_timeline_lists_unlocks() {
    let exe = env!("CARGO_BIN_EXE_advent-tester");
    let output_path = temp_path("timeline");
    let status = Command::new(exe)
        .args([
            "--mode",
            "timeline",
            "--from",
            "2025-12-05T00:00",
            "--to",
            "2025-12-06T12:00",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("| 2025-12-05 06:00:00 | 5 | 5 |"));
    assert!(content.contains("| 2025-12-06 06:00:00 | 6 | 6 |"));
}

#[test]
fn cli_content_check_accepts_full_document() {
    let exe = env!("CARGO_BIN_EXE_advent-tester");
    let dir = questions_dir(24);
    let status = Command::new(exe)
        .args(["--mode", "content", "--report", "json", "--content-dir"])
        .arg(&dir)
        .status()
        .expect("run cli");
    assert!(status.success());
}

#[test]
fn cli_content_check_fails_short_document() {
    let exe = env!("CARGO_BIN_EXE_advent-tester");
    let dir = questions_dir(23);
    let output_path = temp_path("short");
    let status = Command::new(exe)
        .args(["--mode", "content", "--report", "json", "--content-dir"])
        .arg(&dir)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert_eq!(status.code(), Some(1));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("questions.json: invalid"));
}
