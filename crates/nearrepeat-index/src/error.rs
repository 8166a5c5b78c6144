use thiserror::Error;

/// Errors returned by the spatial-temporal index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// A query range with `min > max` on some axis.
    #[error("invalid range on axis {axis}: min {min} > max {max}")]
    InvalidRange { axis: usize, min: i32, max: i32 },
}
