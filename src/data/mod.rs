//! Data module - CSV loading, season classification and ordering

mod loader;
mod processor;
mod season;

pub use loader::{DataLoader, LoaderError, SubmissionRow, Submissions};
pub use processor::DataProcessor;
