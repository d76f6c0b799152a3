use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TimelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Message shown to API clients. Validation messages pass through,
    /// everything else is masked.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Database(_) | Self::Serialization(_) => "internal error".to_string(),
        }
    }
}

/// Failure while importing a JSON Lines file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File not found: {0}")]
    FileNotFound(std::path::PathBuf),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {reason}")]
    Line { line: usize, reason: String },

    #[error(transparent)]
    Store(#[from] TimelineError),
}
