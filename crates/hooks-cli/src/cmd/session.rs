use anyhow::Context;
use hooks_core::paths;
use hooks_core::workdone;
use std::path::Path;

use crate::output::print_json;

pub fn run(root: &Path, json: bool) -> anyhow::Result<i32> {
    let home = paths::home_dir().context("failed to resolve home directory")?;
    let missing =
        workdone::find_missing_entries(root, &home).context("pre-session plan check failed")?;

    if json {
        print_json(&serde_json::json!({ "missing": missing }))?;
        return Ok(i32::from(!missing.is_empty()));
    }

    if missing.is_empty() {
        return Ok(0);
    }

    eprintln!("CRITICAL: Completed plans missing WorkDone.md entries:");
    for entry in &missing {
        eprintln!("- {}: {}", entry.plan_name, entry.plan_path.display());
        eprintln!(
            "  Run: python3 scripts/{} \"{}\"",
            paths::COMPLETION_SCRIPT,
            entry.plan_path.display()
        );
    }
    eprintln!("Then run: python3 scripts/{}", paths::VALIDATE_SCRIPT);
    Ok(1)
}
