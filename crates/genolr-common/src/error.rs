use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenolrError {
    #[error("Invalid Poisson rate: {0} (must be finite and >= 0)")]
    InvalidRate(f64),

    #[error("Invalid observed count: {0} (must be finite and >= 0)")]
    InvalidObservation(f64),

    #[error("Invalid gene variant summary: {0}")]
    InvalidSummary(String),

    #[error("Unknown inheritance mode: {0}")]
    UnknownInheritanceMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenolrError>;
