//! Markdown comparison report.

pub mod markdown;

pub use markdown::{Comparison, render};
