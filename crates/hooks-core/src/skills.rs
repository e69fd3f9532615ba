//! Skill-check heuristics over conversation text.
//!
//! Pure regex matching, no state: the hook decides whether a task-shaped
//! user message shows evidence that a skill reference was consulted first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Static patterns
// ---------------------------------------------------------------------------

static SKILL_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn skill_name_re() -> &'static Regex {
    SKILL_NAME_RE.get_or_init(|| Regex::new(r"<name>([^<]+)</name>").unwrap())
}

/// Phrasings accepted as evidence that a skill reference was consulted.
const SKILL_CHECK_PATTERNS: &[&str] = &[
    r"(?i)openskills read",
    r"(?i)i've read the .+ skill",
    r"(?i)using .+ skill",
    r"(?i)skill read:",
    r"(?i)reading:",
    r"(?i)invoked.*skill",
    r"(?i)checking.*skill",
    r"(?i)relevant skill",
];

/// Verbs that mark a user message as a task needing a prior skill check.
const TASK_TRIGGER_PATTERNS: &[&str] = &[
    r"(?i)implement",
    r"(?i)create",
    r"(?i)build",
    r"(?i)add",
    r"(?i)fix",
    r"(?i)update",
    r"(?i)modify",
    r"(?i)write",
    r"(?i)design",
    r"(?i)plan",
    r"(?i)debug",
    r"(?i)test",
];

static SKILL_CHECK_RES: OnceLock<Vec<Regex>> = OnceLock::new();
static TASK_TRIGGER_RES: OnceLock<Vec<Regex>> = OnceLock::new();

fn skill_check_res() -> &'static [Regex] {
    SKILL_CHECK_RES.get_or_init(|| compile_all(SKILL_CHECK_PATTERNS))
}

fn task_trigger_res() -> &'static [Regex] {
    TASK_TRIGGER_RES.get_or_init(|| compile_all(TASK_TRIGGER_PATTERNS))
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Skill inventory
// ---------------------------------------------------------------------------

/// Skill names declared as `<name>…</name>` in AGENTS.md. A missing file
/// yields an empty list.
pub fn available_skills(agents_md: &Path) -> Result<Vec<String>> {
    if !agents_md.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(agents_md)?;
    Ok(skill_name_re()
        .captures_iter(&content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

// ---------------------------------------------------------------------------
// Hook context
// ---------------------------------------------------------------------------

/// Conversation context supplied by the hook harness.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookContext {
    pub user_message: String,
    pub agent_response: String,
    pub conversation_history: Vec<HistoryMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryMessage {
    pub content: String,
}

impl HookContext {
    /// User message, agent response, and history joined for text matching.
    pub fn combined_text(&self) -> String {
        let mut parts = vec![self.user_message.as_str(), self.agent_response.as_str()];
        parts.extend(self.conversation_history.iter().map(|m| m.content.as_str()));
        parts.join("\n")
    }

    /// Shallow-merge JSON payloads into a context; later layers win per key.
    /// Non-object layers are ignored.
    pub fn from_layers(layers: &[serde_json::Value]) -> Result<Self> {
        let mut merged = serde_json::Map::new();
        for value in layers {
            if let serde_json::Value::Object(map) = value {
                merged.extend(map.clone());
            }
        }
        Ok(serde_json::from_value(serde_json::Value::Object(merged))?)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn mentions_skill_check(text: &str) -> bool {
    let lower = text.to_lowercase();
    skill_check_res().iter().any(|re| re.is_match(&lower))
}

pub fn has_task_trigger(message: &str) -> bool {
    task_trigger_res().iter().any(|re| re.is_match(message))
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCheckMetadata {
    pub has_task_trigger: bool,
    pub has_skill_check: bool,
    pub available_skills_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCheckOutcome {
    pub allowed: bool,
    pub reason: String,
    pub warnings: Vec<String>,
    pub metadata: SkillCheckMetadata,
}

/// A violation iff the user message carries a task trigger and the combined
/// conversation text carries no skill-check evidence.
pub fn validate_skill_check(context: &HookContext, skills: &[String]) -> SkillCheckOutcome {
    let has_skill_check = mentions_skill_check(&context.combined_text());
    let has_task_trigger = has_task_trigger(&context.user_message);

    let metadata = SkillCheckMetadata {
        has_task_trigger,
        has_skill_check,
        available_skills_count: skills.len(),
    };

    if has_task_trigger && !has_skill_check {
        let preview: Vec<&str> = skills.iter().take(5).map(String::as_str).collect();
        return SkillCheckOutcome {
            allowed: false,
            reason: "skill check required before task execution".to_string(),
            warnings: vec![
                "task detected but no evidence of skill check".to_string(),
                "check for relevant skills with: openskills read <skill-name>".to_string(),
                format!("available skills: {}...", preview.join(", ")),
            ],
            metadata,
        };
    }

    SkillCheckOutcome {
        allowed: true,
        reason: "skill check validated".to_string(),
        warnings: Vec::new(),
        metadata,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
