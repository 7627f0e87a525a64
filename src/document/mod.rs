//! Documents: segmentation, discovery, container formats and the persisted
//! translation mirror.

/// Plain-text and `.docx` readers and writers.
pub mod format;
/// Translation map persistence for plain-text outputs.
pub mod persist;
mod segment;
mod store;

pub use format::DocumentFormat;
pub use segment::segment;
pub use store::DocumentStore;
