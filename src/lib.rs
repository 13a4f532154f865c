//! polytrace - Raster polygon editing: line rasterization, seed and scanline fills, clipping with holes

pub mod clip;
pub mod config;
pub mod domain;
pub mod editor;
pub mod fill;
pub mod geometry;
pub mod raster;
pub mod scene;
