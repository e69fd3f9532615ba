//! Cross-reference between completed plans and the WorkDone.md record log.

use crate::error::Result;
use crate::paths;
use crate::plan;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static PLAN_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn plan_name_re() -> &'static Regex {
    PLAN_NAME_RE.get_or_init(|| Regex::new(r"plan_name:\s*([^\n]+)").unwrap())
}

/// Plan names recorded in `docs/WorkDone.md`. A missing file yields the
/// empty set. The recorded value runs to the next colon, so a `plan_name:`
/// line never swallows a following key on the same line.
pub fn recorded_plan_names(root: &Path) -> Result<HashSet<String>> {
    let path = paths::workdone_path(root);
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(plan_name_re()
        .captures_iter(&content)
        .filter_map(|cap| cap.get(1))
        .map(|m| {
            m.as_str()
                .split(':')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .collect())
}

/// A completed plan with no corresponding WorkDone record.
#[derive(Debug, Clone, Serialize)]
pub struct MissingEntry {
    pub plan_name: String,
    pub plan_path: PathBuf,
}

/// Completed plans whose name is absent from the WorkDone log.
pub fn find_missing_entries(root: &Path, home: &Path) -> Result<Vec<MissingEntry>> {
    let completed = plan::completed_plans(root, home)?;
    let recorded = recorded_plan_names(root)?;

    Ok(completed
        .into_iter()
        .filter_map(|plan| {
            let plan_name = plan.name();
            if recorded.contains(&plan_name) {
                None
            } else {
                Some(MissingEntry {
                    plan_name,
                    plan_path: plan.path,
                })
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
