pub mod config;
pub mod logging;

// Leaves
pub mod error;
pub mod formats;
pub mod sniff;

// Reference discovery
pub mod info;
pub mod scan;

// Archive handling and reconciliation
pub mod archive;
pub mod reconcile;

// Upload side
pub mod retry;
pub mod storage;

pub mod pipeline;

pub use error::ExtractError;
pub use pipeline::{ExtractOptions, ExtractionResult, Extractor, TextureMapping};
