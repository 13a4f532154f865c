pub mod area;
pub mod scanline;
pub mod seed;

pub use area::fill_area;
pub use scanline::{scanline_fill, scanline_intercepts};
pub use seed::seed_fill;
