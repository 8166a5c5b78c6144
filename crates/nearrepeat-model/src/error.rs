use thiserror::Error;

/// Errors returned by the event model layer.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The ingestion date string does not parse as `YYYY/MM/DD`.
    #[error("invalid date {0:?}: expected YYYY/MM/DD")]
    InvalidDate(String),

    /// The referenced event id is not in the store.
    #[error("unknown event id: {0}")]
    UnknownId(u32),

    /// An I/O failure while writing the text interchange format.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
