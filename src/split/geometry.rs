//! Slicing geometry
//!
//! The canvas and strip dimensions are part of the wire contract: clients
//! and the PDF page size both assume six 1080x1350 strips cut from a
//! 6480x1350 canvas.

/// Canvas and strip dimensions for the carousel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitGeometry {
    /// Width the upload is stretched to before slicing
    pub canvas_width: u32,

    /// Height the upload is stretched to before slicing
    pub canvas_height: u32,

    /// Width of each strip
    pub part_width: u32,

    /// Height of each strip
    pub part_height: u32,

    /// Number of strips per image
    pub parts: u32,
}

/// Six 1080x1350 strips from a 6480x1350 canvas
pub const CAROUSEL: SplitGeometry = SplitGeometry {
    canvas_width: 6480,
    canvas_height: 1350,
    part_width: 1080,
    part_height: 1350,
    parts: 6,
};

impl SplitGeometry {
    /// Horizontal offset of a strip within the canvas
    pub fn part_offset(&self, index: u32) -> u32 {
        index * self.part_width
    }
}

impl Default for SplitGeometry {
    fn default() -> Self {
        CAROUSEL
    }
}
