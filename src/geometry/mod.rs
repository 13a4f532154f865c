pub mod bounds;
pub mod predicates;
pub mod snap;

pub use bounds::Bounds;
pub use predicates::{
    Orientation, centroid, orientation, point_in_polygon, point_on_boundary, point_on_segment,
    seed_point, signed_area,
};
pub use snap::aligned_point;
