//! Char filters that normalize raw text before tokenization.
//!
//! # Available Filters
//!
//! - [`ascii_folding::AsciiFoldingCharFilter`] - Accent stripping to plain ASCII

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod ascii_folding;

pub use ascii_folding::AsciiFoldingCharFilter;
