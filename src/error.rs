use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("Unknown sub-item kind: {0}")]
    UnknownKind(String),

    #[error("{field} is not a valid date (expected YYYY-MM-DD): {value}")]
    InvalidDate { field: String, value: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Access to contacts required")]
    AccessDenied,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type CleanerResult<T> = Result<T, CleanerError>;
