use thiserror::Error;

/// Errors raised at the engine's boundaries (config, rule files, snapshots).
///
/// The tick loop itself never fails: bad input there is a silent no-op.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Rule parse error: {0}")]
    RuleParse(String),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
