#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

fn escape_path(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().replace('\\', "\\\\")
}

#[test]
fn cli_add_and_show_lists_recommendations() {
    run_cli("add 2025-01-14 Founders Day\nshow\nquit\n")
        .success()
        .stdout(str_contains("Added Founders Day on 2025-01-14 (2 recommendations)."))
        .stdout(str_contains("Long Weekend"))
        .stdout(str_contains("4.00"));
}

#[test]
fn cli_rejects_invalid_date() {
    run_cli("add 14/01/2025 Founders Day\nquit\n")
        .success()
        .stdout(str_contains("Invalid date (YYYY-MM-DD)"));
}

#[test]
fn cli_show_filters_by_type() {
    run_cli("add 2025-01-06 Start\nadd 2025-01-09 End\nshow bridge\nquit\n")
        .success()
        .stdout(str_contains("Bridge"))
        .stdout(str_contains("Take 2 days between Start and End"));
}

#[test]
fn cli_show_without_holidays_reports_nothing() {
    run_cli("show\nquit\n")
        .success()
        .stdout(str_contains("No strategic leave opportunities found."));
}

#[test]
fn cli_loads_csv_and_exports_ics() {
    let mut input = Builder::new().suffix(".csv").tempfile().expect("temp csv");
    writeln!(input, "Date,Holiday\n2025-12-24,Christmas Eve\n2025-12-25,Christmas Day")
        .expect("write csv");
    input.flush().expect("flush csv");
    let output = NamedTempFile::new().expect("temp ics");

    let script = format!(
        "load {}\nexport ics {}\nquit\n",
        escape_path(&input),
        escape_path(&output)
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Loaded 2 holidays"))
        .stdout(str_contains("Exported"));

    let ics = std::fs::read_to_string(output.path()).expect("read ics");
    assert!(ics.contains("BEGIN:VCALENDAR"));
    assert!(ics.contains("STATUS:CONFIRMED"));
    assert!(ics.contains("STATUS:TENTATIVE"));
}

#[test]
fn cli_reports_missing_file() {
    run_cli("load /definitely/not/here.csv\nquit\n")
        .success()
        .stdout(str_contains("Error loading holidays"));
}

#[test]
fn cli_exits_cleanly_at_end_of_input() {
    run_cli("add 2025-01-14 Founders Day\n")
        .success()
        .stdout(str_contains("Added Founders Day"))
        .stderr(predicates::str::is_empty());
}
