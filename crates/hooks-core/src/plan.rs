//! Plan file discovery across the repo-local and home plan directories.

use crate::error::{HookError, Result};
use crate::frontmatter::{self, PlanFrontmatter};
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A plan file with at least one parsed todo.
#[derive(Debug, Clone, Serialize)]
pub struct PlanFile {
    pub path: PathBuf,
    pub frontmatter: PlanFrontmatter,
}

impl PlanFile {
    /// The `name` frontmatter field, falling back to the file stem.
    pub fn name(&self) -> String {
        if let Some(name) = self.frontmatter.name() {
            return name.to_string();
        }
        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        paths::plan_stem(file_name).to_string()
    }

    pub fn is_completed(&self) -> bool {
        frontmatter::all_todos_completed(&self.frontmatter.todos)
    }

    pub fn todo_count(&self) -> usize {
        self.frontmatter.todos.len()
    }

    pub fn completed_count(&self) -> usize {
        self.frontmatter
            .todos
            .iter()
            .filter(|t| t.is_completed())
            .count()
    }
}

/// Scan result. Unreadable files become error strings rather than aborting
/// the scan; the other plan directory may still be fine.
#[derive(Debug, Default, Serialize)]
pub struct ScanOutcome {
    pub plans: Vec<PlanFile>,
    pub errors: Vec<String>,
}

/// Enumerate `*.plan.md` files in both plan directories and keep those whose
/// frontmatter carries at least one todo. Missing directories are skipped.
pub fn find_active_plans(root: &Path, home: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for dir in paths::plan_directories(root, home) {
        scan_dir(&dir, &mut outcome);
    }
    outcome
}

fn scan_dir(dir: &Path, outcome: &mut ScanOutcome) {
    if !dir.is_dir() {
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            outcome
                .errors
                .push(format!("failed to read plan directory {}: {e}", dir.display()));
            return;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| paths::is_plan_file(name))
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let Some(fm) = frontmatter::parse(&content) else {
                    tracing::debug!(path = %path.display(), "plan file has no frontmatter");
                    continue;
                };
                if !fm.todos.is_empty() {
                    outcome.plans.push(PlanFile {
                        path,
                        frontmatter: fm,
                    });
                }
            }
            Err(e) => outcome
                .errors
                .push(format!("failed to parse plan file: {} ({e})", path.display())),
        }
    }
}

/// Plans satisfying the completion invariant. Unlike [`find_active_plans`],
/// any scan error is fatal here: the session check must not silently pass
/// over a directory it could not read.
pub fn completed_plans(root: &Path, home: &Path) -> Result<Vec<PlanFile>> {
    let outcome = find_active_plans(root, home);
    if let Some(err) = outcome.errors.into_iter().next() {
        return Err(HookError::Scan(err));
    }
    Ok(outcome
        .plans
        .into_iter()
        .filter(PlanFile::is_completed)
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
