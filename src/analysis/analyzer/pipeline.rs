//! An analyzer assembled from independent stages.
//!
//! Char filters run first, in insertion order, over the whole text. Token
//! filters then run in insertion order over the tokenizer output. Char
//! filters may change byte lengths, so token spans refer to the filtered
//! text.
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexeval::analysis::analyzer::analyzer::Analyzer;
//! use lexeval::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use lexeval::analysis::token_filter::{LowercaseFilter, StopFilter};
//! use lexeval::analysis::tokenizer::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(["the", "of"])))
//!     .with_name("queries");
//!
//! assert_eq!(
//!     analyzer.terms("Effects of THE drug").unwrap(),
//!     vec!["effects", "drug"]
//! );
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

#[derive(Clone)]
pub struct PipelineAnalyzer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    label: String,
}

impl PipelineAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            label: tokenizer.name().to_string(),
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Name shown in debug output and logs.
    pub fn with_name<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Names of every stage, in execution order.
    pub fn stages(&self) -> Vec<&'static str> {
        self.char_filters
            .iter()
            .map(|c| c.name())
            .chain(std::iter::once(self.tokenizer.name()))
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let normalized = self
            .char_filters
            .iter()
            .fold(Cow::Borrowed(text), |text, char_filter| {
                Cow::Owned(char_filter.filter(&text))
            });

        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&normalized)?, |tokens, filter| {
                filter.filter(tokens)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("label", &self.label)
            .field("stages", &self.stages())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::AsciiFoldingCharFilter;
    use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
    use crate::analysis::tokenizer::RegexTokenizer;

    fn tokenizer() -> Arc<dyn Tokenizer> {
        Arc::new(RegexTokenizer::new().unwrap())
    }

    #[test]
    fn test_filters_run_in_order() {
        // stopwords are matched case-sensitively, so order matters
        let lower_first = PipelineAnalyzer::new(tokenizer())
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(["the"])));
        let stop_first = PipelineAnalyzer::new(tokenizer())
            .add_filter(Arc::new(StopFilter::from_words(["the"])))
            .add_filter(Arc::new(LowercaseFilter::new()));

        assert_eq!(lower_first.terms("The lung").unwrap(), vec!["lung"]);
        assert_eq!(stop_first.terms("The lung").unwrap(), vec!["the", "lung"]);
    }

    #[test]
    fn test_char_filters_run_before_tokenizing() {
        let analyzer = PipelineAnalyzer::new(tokenizer())
            .add_char_filter(Arc::new(AsciiFoldingCharFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));

        // U+FF21 is a fullwidth capital A
        assert_eq!(
            analyzer.terms("\u{ff21}BC Sjögren").unwrap(),
            vec!["abc", "sjogren"]
        );
    }

    #[test]
    fn test_stages_and_label() {
        let analyzer = PipelineAnalyzer::new(tokenizer())
            .add_char_filter(Arc::new(AsciiFoldingCharFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));

        assert_eq!(analyzer.label(), "regex");
        assert_eq!(analyzer.stages(), vec!["ascii_folding", "regex", "lowercase"]);

        let named = analyzer.with_name("records");
        assert!(format!("{named:?}").contains("records"));
    }
}
