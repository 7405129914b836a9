//! Binary-level tests for the `sp` command

mod common;

use std::path::Path;

use assert_cmd::Command;
use common::{CannedServer, completion_body};
use predicates::prelude::*;
use tempfile::TempDir;

const KEY_VAR: &str = "STRATPLAN_CLI_TEST_KEY";

/// Command isolated from the user's config, data and key
fn sp_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sp").expect("Failed to find sp binary");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove(KEY_VAR)
        .env_remove("OPENAI_API_KEY");
    cmd
}

fn write_config(dir: &Path, base_url: &str) -> std::path::PathBuf {
    let path = dir.join("stratplan.yml");
    let yaml = format!(
        "log-level: DEBUG\nllm:\n  base-url: {}\n  api-key-env: {}\n  timeout-ms: 5000\nexport:\n  dir: {}\n",
        base_url,
        KEY_VAR,
        dir.join("out").display()
    );
    std::fs::create_dir_all(dir.join("out")).unwrap();
    std::fs::write(&path, yaml).unwrap();
    path
}

fn run_args() -> Vec<&'static str> {
    vec![
        "run",
        "--objective",
        "Lose weight",
        "--metrics",
        "5kg",
        "--timeline",
        "3 months",
        "--category",
        "Health",
        "--output",
        "myplan",
    ]
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    sp_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wizard"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("Logs are written to:"));
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    sp_cmd(temp.path()).arg("--version").assert().success();
}

#[test]
fn test_run_without_key_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "http://127.0.0.1:9");

    sp_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .args(run_args())
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not found"))
        .stderr(predicate::str::contains(KEY_VAR));
}

#[test]
fn test_run_requires_goal_flags() {
    let temp = TempDir::new().unwrap();
    sp_cmd(temp.path())
        .args(["run", "--objective", "Grow"])
        .assert()
        .failure();
}

#[test]
fn test_logs_prints_tail() {
    let temp = TempDir::new().unwrap();
    // Logging setup opens the file before `logs` reads it
    sp_cmd(temp.path())
        .args(["logs", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logging initialized"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_run_batch_writes_report() {
    let server = CannedServer::start(200, &completion_body("Generated text")).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.base_url);
    let home = temp.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        sp_cmd(&home)
            .arg("--config")
            .arg(&config)
            .args(run_args())
            .env(KEY_VAR, "sk-cli")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report_path = temp.path().join("out").join("myplan.txt");
    assert!(String::from_utf8_lossy(&output.stdout).contains("myplan.txt"));

    let report = std::fs::read_to_string(report_path).unwrap();
    assert!(report.starts_with("Strategic Plan Document\n=======================\nObjective: Lose weight"));
    assert!(report.ends_with("Generated text\n\nGenerated text\n\nGenerated text"));

    // validate, outcomes, plan, rewards
    let requests = server.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|r| r.header("authorization") == Some("Bearer sk-cli")));
}
