//! SixSplit Server Library
//!
//! Exposes the server's modules so the integration tests can drive the
//! full router in-process. The binary entry point is in main.rs.
//!
//! # Modules
//!
//! - `split`: slicing uploads into carousel strips
//! - `store`: the in-memory batch of processed strips
//! - `storage`: strip files on disk and the orphan sweep
//! - `pdf`: assembling selected strips into the export PDF
//! - `routes`: the HTTP surface

pub mod config;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod split;
pub mod state;
pub mod storage;
pub mod store;
