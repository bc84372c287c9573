use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn chatlist(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chatlist").unwrap();
    cmd.current_dir(dir)
        .env_remove("CHATLIST_DB_PATH")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(dir.join("chatlist.db"));
    cmd
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = chatlist(dir).args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("chatlist").unwrap();
    cmd.arg("--help").assert().success().stdout(predicate::str::contains("side-by-side comparison"));
}

#[test]
fn test_cli_model_help() {
    let mut cmd = Command::cargo_bin("chatlist").unwrap();
    cmd.args(["model", "add", "--help"]).assert().success().stdout(predicate::str::contains("api-url"));
}

#[test]
fn test_prompt_model_result_flow() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    let prompt = run_json(path, &["prompt", "add", "Write a sort function", "--tags", "code, code"]);
    assert_eq!(prompt["tags"], "code");
    let prompt_id = prompt["id"].as_i64().unwrap().to_string();

    let model = run_json(
        path,
        &["model", "add", "--name", "GPT-4", "--api-url", "https://api.example.com/v1", "--api-id", "GPT_KEY"],
    );
    let model_id = model["id"].as_i64().unwrap().to_string();

    let result = run_json(
        path,
        &["result", "record", "--prompt", &prompt_id, "--model", &model_id, "--response", "def sort(): ..."],
    );
    let result_id = result["id"].as_i64().unwrap().to_string();
    run_json(path, &["result", "select", &result_id]);

    let selected = run_json(path, &["result", "list", "--selected"]);
    assert_eq!(selected.as_array().unwrap().len(), 1);

    let deleted = run_json(path, &["model", "delete", &model_id]);
    assert_eq!(deleted["results_orphaned"], 1);

    let shown = run_json(path, &["prompt", "show", &prompt_id]);
    assert_eq!(shown["results"][0]["model_id"], Value::Null);
    assert_eq!(shown["results"][0]["selected"], true);

    let deleted = run_json(path, &["prompt", "delete", &prompt_id]);
    assert_eq!(deleted["results_removed"], 1);

    let stats = run_json(path, &["stats"]);
    assert_eq!(stats["prompt_count"], 0);
    assert_eq!(stats["result_count"], 0);
}

#[test]
fn test_duplicate_model_name_fails() {
    let dir = TempDir::new().unwrap();
    let args = ["model", "add", "--name", "Groq", "--api-url", "https://api.example.com", "--api-id", "GROQ_KEY"];

    chatlist(dir.path()).args(args).assert().success();
    chatlist(dir.path()).args(args).assert().failure().stderr(predicate::str::contains("conflict"));
}

#[test]
fn test_record_for_missing_prompt_fails() {
    let dir = TempDir::new().unwrap();
    chatlist(dir.path())
        .args(["result", "record", "--prompt", "42", "--response", "orphan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prompt 42 does not exist"));
}

#[test]
fn test_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    run_json(path, &["setting", "set", "request_timeout", "30"]);
    run_json(path, &["setting", "set", "request_timeout", "45"]);
    let value = run_json(path, &["setting", "get", "request_timeout"]);
    assert_eq!(value["value"], "45");

    let all = run_json(path, &["setting", "list"]);
    assert_eq!(all.as_array().unwrap().len(), 1);

    chatlist(path).args(["setting", "set", "request_timeout", "soon"]).assert().failure();
}

#[test]
fn test_model_check_reports_missing_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_json(
        path,
        &["model", "add", "--name", "Local", "--api-url", "http://localhost:8080", "--api-id", "CHATLIST_TEST_UNSET_KEY"],
    );

    let output = chatlist(path)
        .env_remove("CHATLIST_TEST_UNSET_KEY")
        .args(["model", "check"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report[0]["available"], false);

    let output = chatlist(path)
        .env("CHATLIST_TEST_UNSET_KEY", "secret-value")
        .args(["model", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret-value").not())
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report[0]["available"], true);
}

#[test]
fn test_export_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_json(path, &["prompt", "add", "Explain ownership"]);

    let out_file = path.join("out").join("export.md");
    let summary = run_json(path, &["export", "--format", "markdown", "--output", out_file.to_str().unwrap()]);
    assert_eq!(summary["prompts"], 1);

    let written = std::fs::read_to_string(&out_file).unwrap();
    assert!(written.starts_with("# ChatList export"));
    assert!(written.contains("> Explain ownership"));
}

#[test]
fn test_export_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path();
    run_json(path, &["prompt", "add", "First"]);
    run_json(path, &["prompt", "add", "Second"]);

    let exported = run_json(path, &["export"]);
    assert_eq!(exported.as_array().unwrap().len(), 2);
    assert_eq!(exported[0]["results"], Value::Array(Vec::new()));
}
