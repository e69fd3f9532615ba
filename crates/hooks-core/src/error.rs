use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error("no python runtime found: install python3")]
    NoPythonRuntime,

    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("failed to spawn script: {0}")]
    ScriptSpawnFailed(String),

    #[error("script failed: {0}")]
    ScriptFailed(String),

    #[error("{0}")]
    Scan(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
