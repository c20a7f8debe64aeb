use std::io::Write;
use std::process::{Command, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "tacobox-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("smoke"));
    assert!(content.contains("presence-toggle"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let output_path = temp_path("run");
    let status = Command::new(exe)
        .args(["--report", "json", "--scenarios", "all", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = value.as_array().expect("array of results");
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_replays_script_to_json() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let script_path = temp_path("script");
    std::fs::write(
        &script_path,
        r#"[
            {"action": "tap_item", "item_id": "2"},
            {"action": "adjust_quantity", "delta": 1},
            {"action": "confirm"},
            {"action": "next"},
            {"action": "tap_item", "item_id": "4"},
            {"action": "confirm"}
        ]"#,
    )
    .expect("write script");

    let output = Command::new(exe)
        .args(["--report", "json", "--script"])
        .arg(&script_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json summary");
    assert_eq!(value["applied"], 6);
    assert_eq!(value["view"]["summary"]["total_cents"], 700);
    assert_eq!(value["view"]["summary"]["total_label"], "7.00 €");
}

#[test]
fn cli_rejects_unreadable_script() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let output = Command::new(exe)
        .args(["--script"])
        .arg(temp_path("missing"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read script"));
}

#[test]
fn cli_interactive_session_reads_stdin() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let mut child = Command::new(exe)
        .args(["--interactive", "--menu", "tacos"])
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"tap 1\ntap 3\ntap 3\nquit\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tacos"));
    assert!(stdout.contains("Total: 2.00 €"));
}

#[test]
fn cli_verbose_json_report_stays_parseable() {
    let exe = env!("CARGO_BIN_EXE_tacobox-tester");
    let output = Command::new(exe)
        .args(["--report", "json", "--scenarios", "smoke", "--verbose"])
        .env_remove("RUST_LOG")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout holds only the json report");
    assert_eq!(value[0]["final_total_cents"], 650);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("running scenario"));
}
