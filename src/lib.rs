pub mod clahe;
pub mod cli;
pub mod core;
pub mod file_scanner;
pub mod processing;

pub use clahe::{ClaheParams, ClaheTransform, ImageTransform};
pub use crate::core::{BatchSummary, FailureKind, ProcessingError, ProcessingResult};
pub use processing::{BatchConfig, BatchRunner, FailurePolicy};
