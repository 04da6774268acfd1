use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    UsageError(#[from] clap::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Unsupported accelerator type `{requested}`. Supported types: {supported}")]
    UnsupportedAcceleratorError { requested: String, supported: String },
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
