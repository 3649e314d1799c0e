use crate::domain::decision::TripId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwipeError>;

#[derive(Error, Debug)]
pub enum SwipeError {
    #[error("Trip {0} not found")]
    TripNotFound(TripId),
    #[error("Candidate list unavailable: {0}")]
    CandidateListUnavailable(String),
    #[error("Decision record failure: {0}")]
    DecisionRecordFailure(String),
    #[error("Invalid gesture: {0}")]
    InvalidGesture(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}
