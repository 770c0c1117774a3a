//! Image buffer and encoders.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised while writing an image to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// Quantized 8-bit RGB pixels in row-major order, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Write the image as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);

        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for [r, g, b] in &self.pixels {
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        writer.flush()
    }

    /// Save as PPM to `path`.
    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let file = File::create(path)?;
        self.write_ppm(file)?;
        Ok(())
    }

    /// Save as PNG to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let bytes: Vec<u8> = self.pixels.iter().flatten().copied().collect();
        let rgb = image::RgbImage::from_raw(self.width, self.height, bytes).ok_or(
            OutputError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )?;
        rgb.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_format() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, [255, 0, 0]);
        image.set(1, 0, [0, 255, 0]);
        image.set(0, 1, [0, 0, 255]);
        image.set(1, 1, [12, 34, 56]);

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n12 34 56\n"
        );
    }

    #[test]
    fn test_get_set_row_major() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, [1, 2, 3]);

        assert_eq!(image.get(2, 1), [1, 2, 3]);
        assert_eq!(image.pixels[5], [1, 2, 3]);
        assert_eq!(image.get(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_png_rejects_bad_buffer() {
        let mut image = ImageBuffer::new(2, 2);
        image.pixels.pop();
        let path = std::env::temp_dir().join("gate_bad_buffer.png");

        assert!(matches!(
            image.save_png(&path),
            Err(OutputError::BufferSize { width: 2, height: 2 })
        ));
    }

    #[test]
    fn test_save_ppm_to_disk() {
        let image = ImageBuffer::new(1, 1);
        let path = std::env::temp_dir().join(format!("gate_out_{}.ppm", std::process::id()));

        image.save_ppm(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text, "P3\n1 1\n255\n0 0 0\n");
    }
}
