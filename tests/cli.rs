#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli(registry: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cabiplan-cli").unwrap();
    cmd.arg("--registry").arg(registry);
    cmd
}

#[test]
fn end_to_end_assign_and_roster() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("registry.json");

    cli(&registry)
        .args(["add-clinic", "--name", "Centre", "--location", "Rue Haute"])
        .assert()
        .success();
    cli(&registry)
        .args([
            "add-staff",
            "--email",
            "alice@cab.example",
            "--name",
            "Alice",
            "--role",
            "doctor",
            "--primary-clinic",
            "Centre",
        ])
        .assert()
        .success();
    cli(&registry)
        .args([
            "assign",
            "--clinic",
            "Centre",
            "--staff",
            "alice@cab.example",
            "--date",
            "2025-10-06",
        ])
        .assert()
        .success();

    cli(&registry)
        .args(["status", "--staff", "alice@cab.example", "--date", "2025-10-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("present"));

    cli(&registry)
        .args(["roster", "--date", "2025-10-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn roster_warns_on_understaffed_clinic() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("registry.json");

    cli(&registry)
        .args(["add-clinic", "--name", "Nord", "--location", ""])
        .assert()
        .success();

    cli(&registry)
        .args(["roster", "--date", "2025-10-06"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sans personnel"));
}

#[test]
fn leave_submission_prints_reference() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("registry.json");

    cli(&registry)
        .args(["add-clinic", "--name", "Centre", "--location", ""])
        .assert()
        .success();
    cli(&registry)
        .args([
            "add-staff",
            "--email",
            "sam@cab.example",
            "--name",
            "Sam",
            "--role",
            "dental_assistant",
            "--primary-clinic",
            "Centre",
        ])
        .assert()
        .success();

    cli(&registry)
        .args([
            "leave-submit",
            "--staff",
            "sam@cab.example",
            "--start",
            "2025-10-02",
            "--end",
            "2025-10-04",
            "--reason",
            "congé familial",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("LR-").and(predicate::str::contains("/my-leaves/")));
}
