use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Missing configuration: {key} (set it in site.toml or via {env})")]
    MissingConfig { key: &'static str, env: &'static str },

    #[error("Content service error: {0}")]
    Transport(String),

    #[error("Content service rejected {method}: {message}")]
    Rejected { method: String, message: String },

    #[error("Metadata file error in {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    #[error("Render error for route '{route}': {message}")]
    Render { route: String, message: String },

    #[error("Prerender invariant violated for route '{route}': {message}")]
    Invariant { route: String, message: String },

    #[error("Build error: {0}")]
    Build(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;
