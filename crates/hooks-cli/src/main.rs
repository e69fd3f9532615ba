mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agent-hooks",
    about = "Lifecycle hooks for agent plan completion and skill checks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repo root (default: auto-detect from AGENTS.md or .git/)
    #[arg(long, global = true, env = "HOOK_REPO_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post-todo hook: detect completed plans and trigger the completion workflow
    CompletionCheck {
        /// Detect and report without invoking the completion workflow
        #[arg(long)]
        dry_run: bool,
    },

    /// Session-start hook: fail when completed plans lack WorkDone records
    SessionCheck,

    /// Pre-task hook: require skill-check evidence before task execution
    SkillCheck,

    /// List scanned plan files and their completion state
    Plans,

    /// Inspect the hook wiring configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::CompletionCheck { dry_run } => cmd::completion::run(&root, dry_run, cli.json),
        Commands::SessionCheck => cmd::session::run(&root, cli.json),
        Commands::SkillCheck => cmd::skill::run(&root, cli.json),
        Commands::Plans => cmd::plans::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
