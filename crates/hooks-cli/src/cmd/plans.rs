use anyhow::Context;
use hooks_core::paths;
use hooks_core::plan;
use std::path::Path;

use crate::output::{print_json, print_table};

pub fn run(root: &Path, json: bool) -> anyhow::Result<i32> {
    let home = paths::home_dir().context("failed to resolve home directory")?;
    let outcome = plan::find_active_plans(root, &home);

    if json {
        print_json(&outcome)?;
        return Ok(0);
    }

    if outcome.plans.is_empty() {
        println!("No active plans.");
    } else {
        let rows: Vec<Vec<String>> = outcome
            .plans
            .iter()
            .map(|plan| {
                let status = if plan.is_completed() {
                    "completed"
                } else {
                    "in_progress"
                };
                vec![
                    plan.name(),
                    format!("{}/{}", plan.completed_count(), plan.todo_count()),
                    status.to_string(),
                    plan.path.display().to_string(),
                ]
            })
            .collect();
        print_table(&["NAME", "TODOS", "STATUS", "PATH"], rows);
    }

    for error in &outcome.errors {
        eprintln!("warning: {error}");
    }
    Ok(0)
}
