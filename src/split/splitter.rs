//! Strip splitter
//!
//! Stretches an upload to the full canvas and cuts it into equal vertical
//! strips, each re-encoded as JPEG. Aspect ratio is intentionally ignored
//! so the fixed grid always applies, whatever the upload's dimensions.

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;

use super::geometry::SplitGeometry;

/// One encoded strip of a source image
#[derive(Debug, Clone)]
pub struct SplitStrip {
    /// Position within the canvas, 0 = leftmost
    pub index: u32,

    /// Strip contents as JPEG
    pub jpeg: Vec<u8>,
}

/// Errors produced while splitting an upload
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to process image: {0}")]
    Processing(String),
}

/// Splits uploaded images into carousel strips
#[derive(Debug, Clone)]
pub struct ImageSplitter {
    geometry: SplitGeometry,
}

impl ImageSplitter {
    pub fn new(geometry: SplitGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> SplitGeometry {
        self.geometry
    }

    /// Split one uploaded image into strips
    ///
    /// Decode, resize and encode are CPU-bound, so the whole pipeline runs
    /// on the blocking thread pool.
    pub async fn split(&self, data: Vec<u8>) -> Result<Vec<SplitStrip>, SplitError> {
        let geometry = self.geometry;

        tokio::task::spawn_blocking(move || split_blocking(&geometry, &data))
            .await
            .map_err(|e| SplitError::Processing(format!("Task join error: {}", e)))?
    }
}

fn split_blocking(geometry: &SplitGeometry, data: &[u8]) -> Result<Vec<SplitStrip>, SplitError> {
    let source = image::load_from_memory(data).map_err(|e| SplitError::Decode(e.to_string()))?;

    let canvas = source.resize_exact(
        geometry.canvas_width,
        geometry.canvas_height,
        FilterType::Lanczos3,
    );

    let mut strips = Vec::with_capacity(geometry.parts as usize);
    for index in 0..geometry.parts {
        let strip = canvas.crop_imm(
            geometry.part_offset(index),
            0,
            geometry.part_width,
            geometry.part_height,
        );

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(strip.to_rgb8());

        let mut jpeg = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .map_err(|e| SplitError::Processing(e.to_string()))?;

        strips.push(SplitStrip { index, jpeg });
    }

    Ok(strips)
}
