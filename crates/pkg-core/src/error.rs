use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkgError {
    #[error("unknown tool: {name}. Available: {available}")]
    UnknownBackend { name: String, available: String },

    #[error("'{0}' not found on PATH")]
    ToolNotFound(String),

    #[error("invalid {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PkgError>;
