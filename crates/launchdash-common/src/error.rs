use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("Failed to load dataset {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Dataset has no launch records")]
    EmptyDataset,

    #[error("Unknown launch site: {0}")]
    UnknownSite(String),

    #[error("Invalid payload range: {low} .. {high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
