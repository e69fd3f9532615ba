//! Subprocess invocation for the external plan automation scripts.
//!
//! The completion and sync workflows live in Python scripts under the repo's
//! `scripts/` directory; the hooks only shell out to them. This module
//! detects the available interpreter and wraps the two invocation shapes the
//! hooks need.
//!
//! # Interpreter priority
//! 1. python3
//! 2. python

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{HookError, Result};
use crate::paths;

/// The available Python interpreters, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Python3,
    Python,
}

impl Interpreter {
    pub fn command(&self) -> &'static str {
        match self {
            Interpreter::Python3 => "python3",
            Interpreter::Python => "python",
        }
    }
}

/// Detect the best available Python interpreter.
/// Returns None if no interpreter is found on PATH.
pub fn detect_interpreter() -> Option<Interpreter> {
    if which::which("python3").is_ok() {
        return Some(Interpreter::Python3);
    }
    if which::which("python").is_ok() {
        return Some(Interpreter::Python);
    }
    None
}

/// Run `scripts/execute_plan_completion.py <plan>` from the repo root.
///
/// Output is inherited so workflow progress appears in the hook's own
/// stdout/stderr. A missing script and a non-zero exit are both errors.
pub fn run_completion_script(root: &Path, plan_path: &Path) -> Result<()> {
    let script = paths::script_path(root, paths::COMPLETION_SCRIPT);
    if !script.exists() {
        return Err(HookError::ScriptNotFound(script.display().to_string()));
    }
    let interpreter = detect_interpreter().ok_or(HookError::NoPythonRuntime)?;

    tracing::debug!(script = %script.display(), plan = %plan_path.display(), "running completion workflow");

    let status = Command::new(interpreter.command())
        .arg(&script)
        .arg(plan_path)
        .current_dir(root)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| HookError::ScriptSpawnFailed(e.to_string()))?;

    if !status.success() {
        return Err(HookError::ScriptFailed(format!(
            "{} exited with {status}",
            paths::COMPLETION_SCRIPT
        )));
    }
    Ok(())
}

/// Run `scripts/sync_plan_todos.py <plan> --todos-json <json>` from the repo
/// root. Output is discarded; failures surface through the exit status only.
pub fn run_sync_script(root: &Path, plan_path: &Path, todos_json: &str) -> Result<()> {
    let script = paths::script_path(root, paths::SYNC_SCRIPT);
    if !script.exists() {
        return Err(HookError::ScriptNotFound(script.display().to_string()));
    }
    let interpreter = detect_interpreter().ok_or(HookError::NoPythonRuntime)?;

    let status = Command::new(interpreter.command())
        .arg(&script)
        .arg(plan_path)
        .arg("--todos-json")
        .arg(todos_json)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| HookError::ScriptSpawnFailed(e.to_string()))?;

    if !status.success() {
        return Err(HookError::ScriptFailed(format!(
            "{} exited with {status}",
            paths::SYNC_SCRIPT
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn completion_script_missing_is_error() {
        let repo = TempDir::new().unwrap();
        let plan = repo.path().join("x.plan.md");
        let err = run_completion_script(repo.path(), &plan).unwrap_err();
        assert!(matches!(err, HookError::ScriptNotFound(_)));
        assert!(err.to_string().contains("execute_plan_completion.py"));
    }

    #[test]
    fn sync_script_missing_is_error() {
        let repo = TempDir::new().unwrap();
        let plan = repo.path().join("x.plan.md");
        let err = run_sync_script(repo.path(), &plan, "[]").unwrap_err();
        assert!(matches!(err, HookError::ScriptNotFound(_)));
    }
}
