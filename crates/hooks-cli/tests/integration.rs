#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn agent_hooks(repo: &TempDir, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agent-hooks").unwrap();
    cmd.current_dir(repo.path())
        .env("HOOK_REPO_ROOT", repo.path())
        .env("HOME", home.path())
        .env_remove("TODO_CONTEXT")
        .env_remove("HOOK_CONTEXT")
        .env_remove("DEBUG");
    cmd
}

fn write_plan(base: &Path, name: &str, todos: &[(&str, &str)]) {
    let dir = base.join(".cursor/plans");
    std::fs::create_dir_all(&dir).unwrap();

    let mut lines = vec![
        "---".to_string(),
        format!("name: {name}"),
        "todos:".to_string(),
    ];
    for (id, status) in todos {
        lines.push(format!("  - id: {id}"));
        lines.push(format!("    content: Task {id}"));
        lines.push(format!("    status: {status}"));
    }
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("# Plan".to_string());

    std::fs::write(dir.join(format!("{name}.plan.md")), lines.join("\n")).unwrap();
}

fn write_workdone(repo: &TempDir, plan_name: &str) {
    let docs = repo.path().join("docs");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(
        docs.join("WorkDone.md"),
        format!("---\nplan_name: {plan_name}\nstatus: completed\n---\n"),
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// agent-hooks completion-check
// ---------------------------------------------------------------------------

#[test]
fn completion_check_dry_run_reports_completed_plan() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "done-plan", &[("T1", "completed")]);

    agent_hooks(&repo, &home)
        .args(["completion-check", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan completed: done-plan"))
        .stderr(predicate::str::contains("execute_plan_completion.py"));
}

#[test]
fn completion_check_ignores_incomplete_plans() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "open-plan", &[("T1", "completed"), ("T2", "pending")]);

    agent_hooks(&repo, &home)
        .args(["completion-check", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan completed").not());
}

#[test]
fn completion_check_fails_when_workflow_script_missing() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "done-plan", &[("T1", "completed")]);

    agent_hooks(&repo, &home)
        .arg("completion-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hook execution errors"));
}

#[test]
fn completion_check_rejects_invalid_todo_context() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("completion-check")
        .env("TODO_CONTEXT", "not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TODO_CONTEXT"));
}

#[test]
fn completion_check_requires_one_active_plan_for_sync() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .args(["completion-check", "--dry-run"])
        .env(
            "TODO_CONTEXT",
            r#"[{"id":"T1","content":"Task","status":"pending"}]"#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected exactly one active plan"));
}

#[test]
fn completion_check_json_output() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "done-plan", &[("T1", "completed")]);

    let output = agent_hooks(&repo, &home)
        .args(["completion-check", "--dry-run", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["completed"][0]["name"], "done-plan");
    assert_eq!(report["completed"][0]["workflow_executed"], false);
    assert!(report["errors"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// agent-hooks session-check
// ---------------------------------------------------------------------------

#[test]
fn session_check_passes_with_no_plans() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home).arg("session-check").assert().success();
}

#[test]
fn session_check_fails_when_record_missing() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "finished-plan", &[("T1", "completed")]);

    agent_hooks(&repo, &home)
        .arg("session-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CRITICAL"))
        .stderr(predicate::str::contains("finished-plan"))
        .stderr(predicate::str::contains("validate_plan_completion.py"));
}

#[test]
fn session_check_passes_when_record_exists() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "finished-plan", &[("T1", "completed")]);
    write_workdone(&repo, "finished-plan");

    agent_hooks(&repo, &home).arg("session-check").assert().success();
}

#[test]
fn session_check_scans_home_plans_too() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(home.path(), "home-plan", &[("T1", "completed")]);

    agent_hooks(&repo, &home)
        .arg("session-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("home-plan"));
}

#[test]
fn session_check_ignores_incomplete_plans() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "open-plan", &[("T1", "in_progress")]);

    agent_hooks(&repo, &home).arg("session-check").assert().success();
}

// ---------------------------------------------------------------------------
// agent-hooks skill-check
// ---------------------------------------------------------------------------

#[test]
fn skill_check_blocks_task_without_evidence() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    std::fs::write(
        repo.path().join("AGENTS.md"),
        "<skill><name>rust-testing</name></skill>\n",
    )
    .unwrap();

    agent_hooks(&repo, &home)
        .arg("skill-check")
        .env("HOOK_CONTEXT", r#"{"userMessage":"implement the login flow"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Skill check validation failed"))
        .stderr(predicate::str::contains("rust-testing"));
}

#[test]
fn skill_check_allows_task_with_evidence() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("skill-check")
        .env(
            "HOOK_CONTEXT",
            r#"{"userMessage":"implement the login flow","agentResponse":"Using the rust-testing skill"}"#,
        )
        .assert()
        .success();
}

#[test]
fn skill_check_allows_non_task_message() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("skill-check")
        .env("HOOK_CONTEXT", r#"{"userMessage":"how does the scanner work?"}"#)
        .assert()
        .success();
}

#[test]
fn skill_check_fails_open_on_garbage_context() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("skill-check")
        .env("HOOK_CONTEXT", "{{{ not json")
        .assert()
        .success();
}

#[test]
fn skill_check_stdin_overrides_env_context() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("skill-check")
        .env("HOOK_CONTEXT", r#"{"userMessage":"implement the login flow"}"#)
        .write_stdin(r#"{"userMessage":"hello"}"#)
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// agent-hooks plans
// ---------------------------------------------------------------------------

#[test]
fn plans_lists_scanned_plans() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_plan(repo.path(), "alpha", &[("T1", "completed")]);
    write_plan(repo.path(), "beta", &[("T1", "pending")]);

    agent_hooks(&repo, &home)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("in_progress"));
}

#[test]
fn plans_reports_none_when_empty() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active plans."));
}

// ---------------------------------------------------------------------------
// agent-hooks config validate
// ---------------------------------------------------------------------------

fn write_hooks_config(repo: &TempDir, content: &str) {
    let dir = repo.path().join(".claude");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hooks.json"), content).unwrap();
}

#[test]
fn config_validate_accepts_good_wiring() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_hooks_config(
        &repo,
        r#"{
            "hooks": {
                "PostToolUse": [
                    {
                        "matcher": "^todo_write$",
                        "hooks": [{ "script": "agent-hooks completion-check" }]
                    }
                ],
                "SessionStart": [
                    { "hooks": [{ "script": "agent-hooks session-check" }] }
                ]
            }
        }"#,
    );

    agent_hooks(&repo, &home)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn config_validate_flags_async_completion_hook() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_hooks_config(
        &repo,
        r#"{
            "hooks": {
                "PostToolUse": [
                    {
                        "matcher": "^todo_write$",
                        "hooks": [{ "script": "agent-hooks completion-check", "async": true }]
                    }
                ],
                "SessionStart": [
                    { "hooks": [{ "script": "agent-hooks session-check" }] }
                ]
            }
        }"#,
    );

    agent_hooks(&repo, &home)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("async"));
}

#[test]
fn config_validate_errors_when_config_missing() {
    let repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    agent_hooks(&repo, &home)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hooks config not found"));
}
