use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TileLayoutError {
    /// The container has not been measured yet (or lost its geometry).
    /// Skip this cycle and retry on the next trigger.
    #[error("Layout unavailable: container is not measurable")]
    LayoutUnavailable,
    /// Nothing to lay out: zero tiles or no measured sample.
    #[error("No tiles to lay out")]
    NoTiles,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TileLayoutError>;
