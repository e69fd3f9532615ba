use hooks_core::paths;
use hooks_core::skills::{self, HookContext};
use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::output::print_json;

/// The pre-task skill check. Unlike the plan hooks this fails OPEN: an
/// internal failure must never block the agent, so context gathering and
/// skill inventory errors degrade to defaults instead of propagating.
pub fn run(root: &Path, json: bool) -> anyhow::Result<i32> {
    let context = gather_context();
    let available = skills::available_skills(&paths::agents_md_path(root)).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read available skills");
        Vec::new()
    });

    let outcome = skills::validate_skill_check(&context, &available);

    if json {
        print_json(&outcome)?;
        return Ok(i32::from(!outcome.allowed));
    }

    if !outcome.allowed {
        eprintln!("Skill check validation failed:");
        eprintln!("  {}", outcome.reason);
        for warning in &outcome.warnings {
            eprintln!("  warning: {warning}");
        }
        return Ok(1);
    }

    if std::env::var_os("DEBUG").is_some() {
        println!("✓ Skill check validated");
        println!("  metadata: {}", serde_json::to_string_pretty(&outcome.metadata)?);
    }
    Ok(0)
}

/// Build the hook context from `HOOK_CONTEXT` and piped stdin. Stdin keys
/// win. A layer that does not parse is skipped, never fatal.
fn gather_context() -> HookContext {
    let mut layers = Vec::new();

    if let Ok(raw) = std::env::var("HOOK_CONTEXT") {
        match serde_json::from_str(&raw) {
            Ok(value) => layers.push(value),
            Err(e) => tracing::warn!(error = %e, "failed to parse HOOK_CONTEXT"),
        }
    }

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut buf = String::new();
        if stdin.lock().read_to_string(&mut buf).is_ok() && !buf.trim().is_empty() {
            match serde_json::from_str(&buf) {
                Ok(value) => layers.push(value),
                Err(_) => tracing::debug!("stdin is not JSON, ignoring"),
            }
        }
    }

    HookContext::from_layers(&layers).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to build hook context");
        HookContext::default()
    })
}
