use anyhow::Context;
use hooks_core::completion::{self, CompletionOptions, TodoState};
use hooks_core::paths;
use std::path::Path;

use crate::output::print_json;

pub fn run(root: &Path, dry_run: bool, json: bool) -> anyhow::Result<i32> {
    let home = paths::home_dir().context("failed to resolve home directory")?;

    let todo_context = match std::env::var("TODO_CONTEXT") {
        Ok(raw) => Some(
            serde_json::from_str::<Vec<TodoState>>(&raw).context("invalid TODO_CONTEXT JSON")?,
        ),
        Err(_) => None,
    };

    let options = CompletionOptions {
        dry_run,
        todo_context,
    };
    let report = completion::run_completion_checks(root, &home, &options);

    if json {
        print_json(&report)?;
        return Ok(report.exit_code());
    }

    for plan in &report.completed {
        println!("✓ Plan completed: {}", plan.name);
        println!("  Todos completed: {}", plan.todos);
        if plan.workflow_executed {
            println!("  ✓ Completion workflow executed");
        }
    }

    // Reminders go to stderr so the hook harness surfaces them to the agent.
    for reminder in &report.reminders {
        eprintln!("{reminder}");
    }

    if !report.errors.is_empty() {
        eprintln!("Hook execution errors:");
        for error in &report.errors {
            eprintln!("  - {error}");
        }
    }

    Ok(report.exit_code())
}
