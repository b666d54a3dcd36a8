use crate::checks::CheckError;
use crate::types::ProjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed state document: {0}")]
    MalformedState(String),

    #[error("No state stored for project {0}")]
    MissingState(ProjectId),

    #[error("{checker} checker failed for resource {resource}")]
    CheckerFailure {
        resource: String,
        checker: String,
        #[source]
        source: CheckError,
    },

    #[error("Storage unavailable: {key}")]
    StorageUnavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt record: {key}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid project id: {0:?}")]
    InvalidProjectId(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
