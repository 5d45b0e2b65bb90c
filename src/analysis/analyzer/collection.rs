//! Analyzer shared by records and queries of the test collection.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::AsciiFoldingCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{
    AlphabeticFilter, LengthFilter, LowercaseFilter, StemFilter, StopFilter,
};
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// Shortest term kept in the index.
pub const MIN_TERM_LENGTH: usize = 3;

/// Whether Porter stemming is part of the analysis chain.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// No stemming.
    #[default]
    Plain,
    /// Porter stemming after stopword removal.
    Stemmed,
}

impl Variant {
    /// Both variants, in report order.
    pub const ALL: [Variant; 2] = [Variant::Plain, Variant::Stemmed];

    /// Suffix inserted before the extension of per-variant files.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::Plain => "",
            Variant::Stemmed => ".stemmed",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Plain => "Without stemming",
            Variant::Stemmed => "With stemming",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Stemmed => "stemmed",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The analysis chain applied to record abstracts and query texts:
/// ASCII folding, alphanumeric tokenization, lowercasing, stopword removal,
/// dropping non-alphabetic tokens, optional Porter stemming and finally a
/// minimum term length.
///
/// The length filter runs last so that short stems such as `"ti"` (from
/// `"ties"`) never become terms.
pub struct CollectionAnalyzer {
    variant: Variant,
    inner: PipelineAnalyzer,
}

impl CollectionAnalyzer {
    pub fn new(variant: Variant, stop: StopFilter) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(AsciiFoldingCharFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop))
            .add_filter(Arc::new(AlphabeticFilter::new()));

        if variant == Variant::Stemmed {
            analyzer = analyzer.add_filter(Arc::new(StemFilter::new()));
        }

        let inner = analyzer
            .add_filter(Arc::new(LengthFilter::new(MIN_TERM_LENGTH)))
            .with_name(format!("collection_{variant}"));

        Ok(CollectionAnalyzer { variant, inner })
    }

    /// Analyzer with the built-in English stopword list.
    pub fn with_default_stop_words(variant: Variant) -> Result<Self> {
        Self::new(variant, StopFilter::new())
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Analyze `text` and return the surviving term texts in order.
    pub fn terms(&self, text: &str) -> Result<Vec<String>> {
        Analyzer::terms(self, text)
    }
}

impl Analyzer for CollectionAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "collection"
    }
}

impl fmt::Debug for CollectionAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionAnalyzer")
            .field("variant", &self.variant)
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_terms() {
        let analyzer = CollectionAnalyzer::with_default_stop_words(Variant::Plain).unwrap();
        let terms = analyzer
            .terms("What are the effects of CF on 12 patients' lung-function?")
            .unwrap();

        assert_eq!(terms, vec!["effects", "patients", "lung", "function"]);
    }

    #[test]
    fn test_stemmed_terms() {
        let analyzer = CollectionAnalyzer::with_default_stop_words(Variant::Stemmed).unwrap();
        let terms = analyzer
            .terms("Infections in patients with Pseudomonas")
            .unwrap();

        assert_eq!(terms, vec!["infect", "patient", "pseudomona"]);
    }

    #[test]
    fn test_short_stems_are_dropped() {
        let analyzer = CollectionAnalyzer::with_default_stop_words(Variant::Stemmed).unwrap();
        // "ties" stems to "ti", which is shorter than the minimum term length
        assert!(analyzer.terms("ties").unwrap().is_empty());

        let plain = CollectionAnalyzer::with_default_stop_words(Variant::Plain).unwrap();
        assert_eq!(plain.terms("ties").unwrap(), vec!["ties"]);
    }

    #[test]
    fn test_accents_are_folded() {
        let analyzer = CollectionAnalyzer::with_default_stop_words(Variant::Plain).unwrap();
        assert_eq!(analyzer.terms("Sjögren syndrome").unwrap(), vec!["sjogren", "syndrome"]);
    }

    #[test]
    fn test_custom_stop_words() {
        let stop = StopFilter::from_words(vec!["patients"]);
        let analyzer = CollectionAnalyzer::new(Variant::Plain, stop).unwrap();
        assert_eq!(analyzer.terms("the patients").unwrap(), vec!["the"]);
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::Plain.suffix(), "");
        assert_eq!(Variant::Stemmed.suffix(), ".stemmed");
        assert_eq!(Variant::Stemmed.to_string(), "stemmed");
        assert_eq!(serde_json::to_string(&Variant::Plain).unwrap(), "\"plain\"");
        assert_eq!(Variant::ALL, [Variant::Plain, Variant::Stemmed]);
    }
}
