use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn case(name: &str) -> String {
    repo_path(&format!("test_data/cases/{name}"))
        .to_str()
        .unwrap()
        .to_string()
}

/// `ybus` with HOME pointed at an empty directory, so no user config leaks in.
fn ybus(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ybus").unwrap();
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn build_prints_labeled_table() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["build", &case("three_node_grounded.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Node 1"))
        .stdout(predicate::str::contains("Node 3"))
        .stdout(predicate::str::contains("-5.00000 + 15.00000j"))
        .stdout(predicate::str::contains("5.00000 - 14.97000j"))
        .stdout(predicate::str::contains("6.25000 - 18.69500j"))
        .stdout(predicate::str::contains("1.25000 - 3.97500j"));
}

#[test]
fn build_location_selectable_json_case() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["build", &case("two_node_location.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00000 - 9.98000j"))
        .stdout(predicate::str::contains("0.00000 + 10.00000j"));
}

#[test]
fn build_json_output() {
    let home = tempdir().unwrap();
    let output = ybus(&home)
        .args([
            "build",
            &case("two_node_location.json"),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["policy"], "location-selectable");
    assert_eq!(value["labels"][0], "Node 1");
    assert_eq!(value["formatted"][1][0], "0.00000 + 10.00000j");
}

#[test]
fn build_writes_output_file() {
    let home = tempdir().unwrap();
    let out = home.path().join("ybus.txt");
    ybus(&home)
        .args([
            "build",
            &case("three_node_grounded.toml"),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote Y-bus"));
    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("Node 2"));
}

#[test]
fn policy_flag_overrides_case() {
    // The grounded case pins ground-capable; forcing location-selectable rejects the reactor
    let home = tempdir().unwrap();
    ybus(&home)
        .args([
            "build",
            &case("three_node_grounded.toml"),
            "--policy",
            "location-selectable",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ground connections are not supported"))
        .stdout(predicate::str::contains("Node 1").not());
}

#[test]
fn rejected_case_reports_every_issue() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["build", &case("self_loop.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 errors"))
        .stderr(predicate::str::contains("cannot be equal"))
        .stderr(predicate::str::contains("(Branch 2)"))
        .stderr(predicate::str::contains("cannot be 0 (ground)"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn validate_accepts_with_warning() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["validate", &case("zero_impedance.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zero impedance"))
        .stdout(predicate::str::contains("Bus tie"))
        .stdout(predicate::str::contains("1 warning"));
}

#[test]
fn validate_rejects_self_loop() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["validate", &case("self_loop.toml")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn zero_impedance_branch_builds() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["build", &case("zero_impedance.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00000 - 2.00000j"));
}

#[test]
fn config_sets_default_format() {
    let home = tempdir().unwrap();
    let config = home.path().join("ybus.toml");
    fs::write(&config, "[output]\nformat = \"json\"\npretty_json = false\n").unwrap();

    let output = ybus(&home)
        .args([
            "--config",
            config.to_str().unwrap(),
            "build",
            &case("two_node_location.json"),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("\"n_nodes\":2"));
}

#[test]
fn config_policy_applies_when_case_is_silent() {
    let home = tempdir().unwrap();
    let config = home.path().join("ybus.toml");
    fs::write(&config, "[core]\npolicy = \"location-selectable\"\n").unwrap();

    // zero_impedance.toml has a ground branch and no policy of its own
    ybus(&home)
        .args([
            "--config",
            config.to_str().unwrap(),
            "validate",
            &case("zero_impedance.toml"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("location-selectable"));
}

#[test]
fn config_init_then_show() {
    let home = tempdir().unwrap();
    let config = home.path().join("conf").join("config.toml");
    let config_arg = config.to_str().unwrap();

    ybus(&home)
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    ybus(&home)
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ybus(&home)
        .args(["--config", config_arg, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("policy = \"ground-capable\""));
}

#[test]
fn unsupported_case_extension_fails() {
    let home = tempdir().unwrap();
    let bogus = home.path().join("case.csv");
    fs::write(&bogus, "from,to\n1,2\n").unwrap();
    ybus(&home)
        .args(["build", bogus.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected .toml or .json"));
}

#[test]
fn completions_generate() {
    let home = tempdir().unwrap();
    ybus(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ybus"));
}

#[test]
fn completions_into_directory() {
    let home = tempdir().unwrap();
    let dir = home.path().join("completions");
    fs::create_dir_all(&dir).unwrap();
    ybus(&home)
        .args(["completions", "bash", "--out", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ybus.bash"));
    let script = fs::read_to_string(dir.join("ybus.bash")).unwrap();
    assert!(script.contains("ybus"));
}

#[test]
fn small_negative_susceptance_keeps_minus_sign() {
    // Node 2 ends up at 1 - 0.000004j, which rounds to zero but stays negative
    let home = tempdir().unwrap();
    let case_file = home.path().join("tiny.toml");
    fs::write(
        &case_file,
        "n_nodes = 2\npolicy = \"location-selectable\"\n\n[[branches]]\nfrom = 1\nto = 2\nresistance = 1.0\nshunt = -0.000004\nlocation = \"end\"\n",
    )
    .unwrap();
    ybus(&home)
        .args(["build", case_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.00000 - 0.00000j"))
        .stdout(predicate::str::contains("1.00000 + 0.00000j"));
}
