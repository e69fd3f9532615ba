use crate::error::{HookError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Plan files live under this directory, both repo-local and in `$HOME`.
pub const PLANS_DIR: &str = ".cursor/plans";
pub const PLAN_SUFFIX: &str = ".plan.md";

pub const WORKDONE_FILE: &str = "docs/WorkDone.md";
pub const AGENTS_MD: &str = "AGENTS.md";
pub const HOOKS_CONFIG_FILE: &str = ".claude/hooks.json";

pub const SCRIPTS_DIR: &str = "scripts";
pub const COMPLETION_SCRIPT: &str = "execute_plan_completion.py";
pub const SYNC_SCRIPT: &str = "sync_plan_todos.py";
pub const VALIDATE_SCRIPT: &str = "validate_plan_completion.py";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn repo_plans_dir(root: &Path) -> PathBuf {
    root.join(PLANS_DIR)
}

pub fn home_plans_dir(home: &Path) -> PathBuf {
    home.join(PLANS_DIR)
}

/// Both plan directories, deduplicated when root and home coincide.
pub fn plan_directories(root: &Path, home: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![repo_plans_dir(root), home_plans_dir(home)];
    dirs.dedup();
    dirs
}

pub fn workdone_path(root: &Path) -> PathBuf {
    root.join(WORKDONE_FILE)
}

pub fn agents_md_path(root: &Path) -> PathBuf {
    root.join(AGENTS_MD)
}

pub fn hooks_config_path(root: &Path) -> PathBuf {
    root.join(HOOKS_CONFIG_FILE)
}

pub fn script_path(root: &Path, name: &str) -> PathBuf {
    root.join(SCRIPTS_DIR).join(name)
}

pub fn is_plan_file(file_name: &str) -> bool {
    file_name.ends_with(PLAN_SUFFIX)
}

/// File name with the `.plan.md` suffix removed.
pub fn plan_stem(file_name: &str) -> &str {
    file_name.strip_suffix(PLAN_SUFFIX).unwrap_or(file_name)
}

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(HookError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_directories_covers_repo_and_home() {
        let dirs = plan_directories(Path::new("/tmp/repo"), Path::new("/tmp/home"));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/tmp/repo/.cursor/plans"),
                PathBuf::from("/tmp/home/.cursor/plans"),
            ]
        );
    }

    #[test]
    fn plan_directories_dedups_identical_roots() {
        let dirs = plan_directories(Path::new("/tmp/same"), Path::new("/tmp/same"));
        assert_eq!(dirs.len(), 1);
    }

    #[test]
    fn plan_file_detection() {
        assert!(is_plan_file("auth.plan.md"));
        assert!(!is_plan_file("auth.md"));
        assert!(!is_plan_file("notes.txt"));
        assert_eq!(plan_stem("auth.plan.md"), "auth");
        assert_eq!(plan_stem("notes.txt"), "notes.txt");
    }

    #[test]
    fn script_paths() {
        let root = Path::new("/tmp/repo");
        assert_eq!(
            script_path(root, COMPLETION_SCRIPT),
            PathBuf::from("/tmp/repo/scripts/execute_plan_completion.py")
        );
        assert_eq!(
            workdone_path(root),
            PathBuf::from("/tmp/repo/docs/WorkDone.md")
        );
    }
}
