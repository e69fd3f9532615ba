use std::path::{Path, PathBuf};

/// Resolve the repository root the hooks operate on.
///
/// Priority:
/// 1. `--root` flag / `HOOK_REPO_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from the cwd looking for `AGENTS.md`
/// 3. Walk upward from the cwd looking for `.git/`
/// 4. Fall back to the cwd
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(hooks_core::paths::AGENTS_MD).is_file() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    let mut dir = cwd.clone();
    loop {
        if dir.join(".git").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}
