pub mod error;
pub mod point;
pub mod polygon;

pub use error::InvalidShapeError;
pub use point::Point;
pub use polygon::{FillMode, Polygon, regular_pentagon};
