pub mod line;
pub mod ppm;
pub mod surface;

pub use line::{BresenhamLine, draw_outline, rasterize_line};
pub use ppm::write_ppm;
pub use surface::{Color, PixelSurface};
