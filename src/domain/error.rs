/// Rejected shape operations. The shape involved is left unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidShapeError {
    #[error("hole must be a closed polygon")]
    NotClosed,
    #[error("hole must lie inside the polygon")]
    NotContained,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon is already closed")]
    AlreadyClosed,
    #[error("radius must be positive, got {radius}")]
    NonPositiveRadius { radius: i32 },
}
