//! PDF assembly module
//!
//! Builds the export PDF from selected strips.

mod assembler;

pub use assembler::{PdfAssembler, PdfError};
