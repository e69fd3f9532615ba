//! Plan completion orchestration behind the post-todo hook.
//!
//! After a todo update, the hook optionally syncs the agent's todo snapshot
//! into the active plan, rescans, and triggers the completion workflow for
//! every plan whose todos are all completed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths;
use crate::plan;
use crate::script;

/// Agent-side todo snapshot, deserialized from the `TODO_CONTEXT`
/// environment JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoState {
    pub id: String,
    pub content: String,
    pub status: String,
}

#[derive(Debug, Default)]
pub struct CompletionOptions {
    /// Detect and report without invoking the completion workflow.
    pub dry_run: bool,
    /// Todo snapshot to sync into the single active plan before checking.
    pub todo_context: Option<Vec<TodoState>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletedPlan {
    pub name: String,
    pub path: PathBuf,
    pub todos: usize,
    pub workflow_executed: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct CompletionReport {
    pub completed: Vec<CompletedPlan>,
    pub reminders: Vec<String>,
    pub errors: Vec<String>,
}

impl CompletionReport {
    pub fn exit_code(&self) -> i32 {
        if self.errors.is_empty() {
            0
        } else {
            1
        }
    }
}

/// One-line reminder naming the manual fallback commands. The plan path is
/// shown repo-relative when it lies under the repo root.
pub fn build_completion_reminder(plan_path: &Path, root: &Path) -> String {
    let display = plan_path.strip_prefix(root).unwrap_or(plan_path);
    format!(
        "CRITICAL: Plan completed. If automation failed, run: python3 scripts/{} \"{}\" Then re-run: python3 scripts/{}",
        paths::COMPLETION_SCRIPT,
        display.display(),
        paths::VALIDATE_SCRIPT
    )
}

/// Sync the todo snapshot to the plan file. Requires exactly one active plan;
/// anything else is reported back as an error string.
fn sync_todo_context(root: &Path, home: &Path, todos: &[TodoState]) -> Result<(), String> {
    let outcome = plan::find_active_plans(root, home);

    if outcome.plans.len() == 1 {
        let target = &outcome.plans[0];
        let json = serde_json::to_string(todos).map_err(|e| e.to_string())?;
        return script::run_sync_script(root, &target.path, &json).map_err(|e| e.to_string());
    }

    if !outcome.errors.is_empty() {
        return Err(outcome.errors.join("; "));
    }

    Err(format!(
        "expected exactly one active plan, found {}",
        outcome.plans.len()
    ))
}

/// The post-todo completion check: sync (when a todo context was supplied),
/// scan, and trigger the completion workflow for every completed plan.
///
/// Failures accumulate in the report rather than aborting; a partially
/// failed run still reports the remaining plans.
pub fn run_completion_checks(
    root: &Path,
    home: &Path,
    options: &CompletionOptions,
) -> CompletionReport {
    let mut report = CompletionReport::default();

    if let Some(todos) = &options.todo_context {
        if let Err(e) = sync_todo_context(root, home, todos) {
            report.errors.push(format!("failed to sync todos: {e}"));
        }
    }

    let outcome = plan::find_active_plans(root, home);
    report.errors.extend(outcome.errors);

    for plan in outcome.plans {
        if !plan.is_completed() {
            continue;
        }
        tracing::debug!(plan = %plan.path.display(), "all todos completed");

        report
            .reminders
            .push(build_completion_reminder(&plan.path, root));

        let mut workflow_executed = false;
        if !options.dry_run {
            match script::run_completion_script(root, &plan.path) {
                Ok(()) => workflow_executed = true,
                Err(e) => report.errors.push(e.to_string()),
            }
        }

        report.completed.push(CompletedPlan {
            name: plan.name(),
            path: plan.path.clone(),
            todos: plan.todo_count(),
            workflow_executed,
        });
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
