// Сценарии, которые завершают процесс или пишут в stderr, проверяем на собранных примерах.

use std::fs;
use std::process::{Command, Output};

fn run(bin: &str, arg: &std::path::Path, cwd: &std::path::Path) -> Output {
    Command::new(bin)
        .arg(arg)
        .current_dir(cwd)
        .output()
        .expect("failed to run example binary")
}

#[test]
fn unopenable_log_file_exits_with_status_1() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().canonicalize().unwrap();
    let path = cwd.join("missing").join("error.log");

    let output = run(env!("CARGO_BIN_EXE_example_error_init"), &path, &cwd);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("open log file failed: {}", path.display())));
    assert!(stderr.contains(&format!("log execute at: {}", cwd.display())));
    assert!(output.stdout.is_empty());
}

#[test]
fn console_only_policy_keeps_running() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("fallback.log");

    let output = run(env!("CARGO_BIN_EXE_example_fallback"), &path, dir.path());

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open log file failed"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.split_terminator("\r\n").count(), 2);
    assert!(stdout.contains("file output disabled: true"));
}

#[test]
fn removed_log_file_produces_one_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("removed.log");

    let output = run(env!("CARGO_BIN_EXE_example_removed_file"), &path, dir.path());

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let notices: Vec<&str> = stderr.lines().collect();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("log file has been removed"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.split_terminator("\r\n").count(), 4);
    assert!(!path.exists());
}

#[test]
fn simple_example_writes_file_and_console() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_example_simple"))
        .current_dir(dir.path())
        .output()
        .expect("failed to run example binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.split_terminator("\r\n").count(), 5);
    assert!(stdout.lines().all(|line| line.starts_with("[GIN] ")));

    let file = fs::read_to_string(dir.path().join("logs").join("simple.log")).unwrap();
    let lines: Vec<&str> = file.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("DEBUG"));
    assert!(lines[0].ends_with("hello124"));
    assert!(lines[4].contains("FATAL"));
    assert!(lines[4].ends_with("safa:271"));
}
