//! PDF assembler
//!
//! Each selected strip becomes one page of exactly the strip's pixel size
//! in points, with the stored JPEG embedded as-is (DCT) so nothing is
//! re-encoded. At 72 dpi one pixel maps to one point, so the image fills
//! the page edge to edge.

use std::path::Path;

use axum::body::Bytes;
use printpdf::{
    ColorBits, ColorSpace, Image, ImageFilter, ImageTransform, ImageXObject, Mm, PdfDocument, Pt,
    Px,
};

use crate::split::SplitGeometry;
use crate::store::ImagePart;

const PAGE_DPI: f32 = 72.0;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("No images selected for PDF")]
    InvalidSelection,

    #[error("Selected index {index} out of range (batch has {len} parts)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Failed to render PDF: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assembles selected strips into a multi-page PDF
#[derive(Debug, Clone)]
pub struct PdfAssembler {
    geometry: SplitGeometry,
}

impl PdfAssembler {
    pub fn new(geometry: SplitGeometry) -> Self {
        Self { geometry }
    }

    /// Validate a selection against the current batch size
    ///
    /// Runs before any file is touched: an empty selection or any index
    /// outside the batch fails the whole request.
    pub fn validate_selection(selection: &[i64], len: usize) -> Result<Vec<usize>, PdfError> {
        if selection.is_empty() {
            return Err(PdfError::InvalidSelection);
        }

        selection
            .iter()
            .map(|&index| {
                usize::try_from(index)
                    .ok()
                    .filter(|&i| i < len)
                    .ok_or(PdfError::IndexOutOfRange { index, len })
            })
            .collect()
    }

    /// Build the PDF for `selection` and write it to `output`
    ///
    /// Pages appear in selection order. The output file is overwritten.
    pub async fn assemble(
        &self,
        parts: &[ImagePart],
        selection: &[i64],
        output: &Path,
    ) -> Result<(), PdfError> {
        let indices = Self::validate_selection(selection, parts.len())?;

        let pages: Vec<Bytes> = indices.iter().map(|&i| parts[i].data.clone()).collect();
        let geometry = self.geometry;

        let bytes = tokio::task::spawn_blocking(move || render(&geometry, &pages))
            .await
            .map_err(|e| PdfError::Render(format!("Task join error: {}", e)))??;

        tokio::fs::write(output, bytes).await?;
        Ok(())
    }
}

fn render(geometry: &SplitGeometry, pages: &[Bytes]) -> Result<Vec<u8>, PdfError> {
    let page_width = Mm::from(Pt(geometry.part_width as f32));
    let page_height = Mm::from(Pt(geometry.part_height as f32));

    let (doc, first_page, first_layer) =
        PdfDocument::new("Processed Images", page_width, page_height, "Layer 1");

    for (i, jpeg) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(page_width, page_height, "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let image = Image::from(ImageXObject {
            width: Px(geometry.part_width as usize),
            height: Px(geometry.part_height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: jpeg.to_vec(),
            image_filter: Some(ImageFilter::DCT),
            clipping_bbox: None,
            smask: None,
        });

        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(0.0)),
                dpi: Some(PAGE_DPI),
                ..Default::default()
            },
        );
    }

    doc.save_to_bytes()
        .map_err(|e| PdfError::Render(e.to_string()))
}
