use super::PixelSurface;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a surface to a binary PPM file
///
/// Binary PPM (P6) format:
/// - ASCII header `P6\n<width> <height>\n255\n`
/// - For each pixel, row-major: 3 bytes R, G, B
///
/// Colors are read as packed 0xRRGGBB; any higher byte is ignored.
pub fn write_ppm(path: &Path, surface: &PixelSurface) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PPM file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", surface.width(), surface.height())?;

    for &color in surface.pixels() {
        let [_, r, g, b] = color.to_be_bytes();
        writer.write_all(&[r, g, b])?;
    }

    writer.flush()?;

    Ok(())
}

/// Get the file size of a PPM image with the given dimensions
pub fn estimate_ppm_size(width: usize, height: usize) -> usize {
    let header = format!("P6\n{} {}\n255\n", width, height);
    header.len() + width * height * 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_ppm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.ppm");

        let mut surface = PixelSurface::new(3, 2, 0x000000);
        surface.set(0, 0, 0x12AB34);

        write_ppm(&path, &surface).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), estimate_ppm_size(3, 2));
        assert!(bytes.starts_with(b"P6\n3 2\n255\n"));

        let header_len = "P6\n3 2\n255\n".len();
        assert_eq!(&bytes[header_len..header_len + 3], &[0x12, 0xAB, 0x34]);
        assert_eq!(&bytes[header_len + 3..header_len + 6], &[0, 0, 0]);
    }

    #[test]
    fn test_estimate_size() {
        // "P6\n10 10\n255\n" is 13 bytes
        assert_eq!(estimate_ppm_size(10, 10), 13 + 300);
    }
}
