use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine worker is no longer running")]
    WorkerGone,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
