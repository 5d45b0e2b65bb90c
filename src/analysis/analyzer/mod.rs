//! Analyzer implementations that combine tokenizers and filters.

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod collection;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use collection::{CollectionAnalyzer, Variant};
pub use pipeline::PipelineAnalyzer;
