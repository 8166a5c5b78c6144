use thiserror::Error;

/// Errors returned by edge construction and component grouping.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A negative gap parameter passed to edge construction.
    #[error("negative gap on axis {axis}: {gap}")]
    NegativeGap { axis: usize, gap: i32 },

    /// An edge endpoint outside the known id space. This is a caller
    /// contract violation, not a recoverable condition.
    #[error("edge endpoint {id} out of bounds for {len} known events")]
    NodeOutOfBounds { id: u32, len: usize },

    /// An error from the spatial-temporal index layer.
    #[error("index error: {0}")]
    Index(#[from] nearrepeat_index::IndexError),
}
