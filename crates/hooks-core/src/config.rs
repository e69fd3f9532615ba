//! Hook wiring configuration (`.claude/hooks.json`).
//!
//! The agent harness decides which hook commands run on which events; this
//! module validates that the wiring keeps plan completion enforcement
//! present, synchronous, and blocking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::paths;

/// Matcher the completion check must be wired to.
pub const TODO_WRITE_MATCHER: &str = "^todo_write$";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// HooksConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Event name (e.g. `PostToolUse`, `SessionStart`) to matcher blocks.
    #[serde(default)]
    pub hooks: HashMap<String, Vec<HookMatcher>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookMatcher {
    #[serde(default)]
    pub matcher: Option<String>,
    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookEntry {
    pub script: String,
    #[serde(rename = "continueOnError", default)]
    pub continue_on_error: bool,
    #[serde(rename = "async", default)]
    pub asynchronous: bool,
}

impl HooksConfig {
    /// Load `.claude/hooks.json` under `root`. `None` when absent.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = paths::hooks_config_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Check the wiring for mistakes that would defeat the hooks.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let todo_hooks: Vec<&HookEntry> = self
            .hooks
            .get("PostToolUse")
            .into_iter()
            .flatten()
            .filter(|block| block.matcher.as_deref() == Some(TODO_WRITE_MATCHER))
            .flat_map(|block| &block.hooks)
            .collect();

        if todo_hooks.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "no PostToolUse hook matches {TODO_WRITE_MATCHER}: plan completion will not be detected"
                ),
            });
        }

        for entry in todo_hooks {
            if entry.continue_on_error {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "completion hook '{}' sets continueOnError: completion failures would be swallowed",
                        entry.script
                    ),
                });
            }
            if entry.asynchronous {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "completion hook '{}' runs async: it must block the todo update it checks",
                        entry.script
                    ),
                });
            }
        }

        let has_session_check = self
            .hooks
            .get("SessionStart")
            .into_iter()
            .flatten()
            .flat_map(|block| &block.hooks)
            .any(|entry| entry.script.contains("session-check"));

        if !has_session_check {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no SessionStart hook runs the session check: unrecorded completed plans will go unnoticed"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
