use thiserror::Error;

/// All errors that can occur in lookup-core.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
