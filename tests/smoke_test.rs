/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn treeodds() -> Command {
    Command::new(env!("CARGO_BIN_EXE_treeodds"))
}

#[test]
fn binary_shows_help() {
    let output = treeodds()
        .arg("--help")
        .output()
        .expect("Failed to execute treeodds");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("treeodds"),
        "Help output should mention treeodds"
    );
}

#[test]
fn binary_shows_version() {
    let output = treeodds()
        .arg("--version")
        .output()
        .expect("Failed to execute treeodds");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = treeodds()
        .arg("nonexistent-command")
        .output()
        .expect("Failed to execute treeodds");

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Should show helpful error, not a panic backtrace
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn print_reports_fifty_percent_for_one_of_each() {
    let output = treeodds()
        .args(["print", "--depth", "2", "--drop", "1:a", "--drop", "2:b", "--no-color"])
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("Failed to execute treeodds");

    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total Possible Arrangements: 4"));
    assert!(stdout.contains("Green iPhones: 1"));
    assert!(stdout.contains("Purple iPhones: 1"));
    assert!(stdout.contains("50.00%"));
    assert!(!stdout.contains('\x1b'), "--no-color output should be plain");
}

#[test]
fn print_json_numbers_every_leaf() {
    let output = treeodds()
        .args(["print", "--depth", "3", "--drop", "BAB:b", "--json"])
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("Failed to execute treeodds");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"total_arrangements\": 8"));
    assert!(stdout.contains("\"path\": \"BAB\""));
    for id in 1..=8 {
        assert!(stdout.contains(&format!("\"id\": {id},")), "missing leaf {id}");
    }
}

#[test]
fn print_rejects_leaf_outside_tree() {
    let output = treeodds()
        .args(["print", "--depth", "2", "--drop", "9:a"])
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .output()
        .expect("Failed to execute treeodds");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"), "unexpected error: {stderr}");
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn malformed_drop_is_a_usage_error() {
    let output = treeodds()
        .args(["print", "--drop", "three:a"])
        .output()
        .expect("Failed to execute treeodds");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid drop"), "unexpected error: {stderr}");
}
