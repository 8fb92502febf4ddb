use thiserror::Error;

/// Everything that can stop a kernel estimation run.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("line {line}: expected at least {} tab-separated fields, found {fields}", column + 1)]
    MalformedRecord {
        line: usize,
        fields: usize,
        column: usize,
    },

    #[error("line {line}: node id {field:?} is not a non-negative integer")]
    InvalidNodeId { line: usize, field: String },

    #[error("line {line}: node id {id} exceeds the configured maximum {max}")]
    NodeIdOutOfRange { line: usize, id: u64, max: u64 },

    #[error("insufficient data: degree class 1 never accumulated exposure and selections")]
    InsufficientData,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
