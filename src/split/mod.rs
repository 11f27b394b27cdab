//! Image splitting
//!
//! Turns one uploaded image into six equal vertical strips sized for the
//! carousel layout.

pub mod geometry;
pub mod splitter;

pub use geometry::{SplitGeometry, CAROUSEL};
pub use splitter::{ImageSplitter, SplitError, SplitStrip};
