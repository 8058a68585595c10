use thiserror::Error;

/// Errors that can occur while computing a width profile.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("input table must contain '{0}' column")]
    MissingColumn(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
