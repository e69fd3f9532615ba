use anyhow::Context;
use clap::Subcommand;
use hooks_core::config::{HooksConfig, WarnLevel};
use hooks_core::paths;
use std::path::Path;

use crate::output::print_json;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the hook wiring for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<i32> {
    match subcmd {
        ConfigSubcommand::Validate => validate(root, json),
    }
}

fn validate(root: &Path, json: bool) -> anyhow::Result<i32> {
    let config = HooksConfig::load(root)
        .context("failed to load hooks config")?
        .with_context(|| format!("hooks config not found: {}", paths::HOOKS_CONFIG_FILE))?;

    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Hook wiring is valid. No warnings.");
    } else {
        for warning in &warnings {
            let label = match warning.level {
                WarnLevel::Error => "error",
                WarnLevel::Warning => "warning",
            };
            println!("{label}: {}", warning.message);
        }
    }

    let has_error = warnings.iter().any(|w| w.level == WarnLevel::Error);
    Ok(i32::from(has_error))
}
