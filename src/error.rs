use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlertError>;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("unknown alert family tag in stored row: '{0}'")]
    UnknownFamily(String),

    #[error("advisory {message_code}-{serial_number} has no issue time, cannot build natural key")]
    MissingIssueTime {
        message_code: String,
        serial_number: String,
    },

    #[error("invalid advisory payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("translation failed: {0}")]
    Translation(String),
}
