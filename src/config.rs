//! Pipeline configuration.
//!
//! Settings come from an instruction file of `KEY=VALUE` lines:
//!
//! ```text
//! # Cystic Fibrosis collection
//! QUERIES=data/cfquery.xml
//! RECORDS=data/cf74.xml
//! RECORDS=data/cf75.xml
//! OUTPUT_DIR="result"   # quotes are stripped
//! TOP_K=40
//! ```
//!
//! Text after `#` is a comment. `RECORDS` may be repeated; every other key
//! must appear at most once. Relative paths are resolved against the
//! directory holding the instruction file.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use lexeval::analysis::Variant;
//! use lexeval::config::PipelineConfig;
//!
//! let config = PipelineConfig::from_instructions("OUTPUT_DIR=out\nTOP_K=10", Path::new("/data")).unwrap();
//! assert_eq!(config.top_k, 10);
//! assert_eq!(config.results_path(Variant::Stemmed), Path::new("/data/out/results.stemmed.csv"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::Variant;
use crate::analysis::token_filter::StopFilter;
use crate::error::{LexevalError, Result};

/// Default number of documents kept per query.
pub const DEFAULT_TOP_K: usize = 40;

const KNOWN_KEYS: &[&str] = &["QUERIES", "RECORDS", "STOPWORDS", "OUTPUT_DIR", "TOP_K", "REPORT"];

/// Raw `KEY=VALUE` pairs in file order, grouped by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instructions {
    values: BTreeMap<String, Vec<String>>,
}

impl Instructions {
    /// Parse instruction text. Malformed lines and empty values are logged
    /// and skipped.
    pub fn parse(text: &str) -> Self {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (number, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().replace('"', "");
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring malformed instruction on line {}: '{raw}'", number + 1);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                warn!("Ignoring empty instruction on line {}: '{raw}'", number + 1);
                continue;
            }

            debug!("{key} = {value}");
            values
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }

        Instructions { values }
    }

    /// All values given for `key`, in file order.
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The value of a key that may appear at most once.
    pub fn single(&self, key: &str) -> Result<Option<&str>> {
        match self.all(key) {
            [] => Ok(None),
            [value] => Ok(Some(value.as_str())),
            values => Err(LexevalError::config(format!(
                "{key} given {} times, expected at most once",
                values.len()
            ))),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Locations and parameters of an evaluation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CFC query XML file.
    pub queries: PathBuf,
    /// CFC record XML files.
    pub records: Vec<PathBuf>,
    /// Stopword file, one word per line. `None` uses the built-in list.
    pub stopwords: Option<PathBuf>,
    /// Directory receiving every intermediate file.
    pub output_dir: PathBuf,
    /// Number of ranked documents kept per query.
    pub top_k: usize,
    /// Markdown report destination.
    pub report: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            queries: PathBuf::from("data/cfquery.xml"),
            records: (74..=79)
                .map(|year| PathBuf::from(format!("data/cf{year}.xml")))
                .collect(),
            stopwords: None,
            output_dir: PathBuf::from("result"),
            top_k: DEFAULT_TOP_K,
            report: PathBuf::from("result/REPORT.md"),
        }
    }
}

impl PipelineConfig {
    /// Load the instruction file at `path`, or use the defaults relative to
    /// the working directory when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Read an instruction file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            LexevalError::config(format!("Cannot read '{}': {e}", path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        debug!("Parsing configuration '{}'", path.display());
        Self::from_instructions(&text, base)
    }

    /// Build a configuration from instruction text, resolving relative paths
    /// against `base`.
    pub fn from_instructions(text: &str, base: &Path) -> Result<Self> {
        let instructions = Instructions::parse(text);
        for key in instructions.keys() {
            if !KNOWN_KEYS.contains(&key) {
                warn!("Unknown configuration key '{key}'");
            }
        }

        let defaults = Self::default();
        let resolve = |value: &str| base.join(value);

        let queries = instructions
            .single("QUERIES")?
            .map(resolve)
            .unwrap_or_else(|| base.join(&defaults.queries));

        let records = match instructions.all("RECORDS") {
            [] => defaults.records.iter().map(|r| base.join(r)).collect(),
            values => values.iter().map(|v| resolve(v)).collect(),
        };

        let stopwords = instructions.single("STOPWORDS")?.map(resolve);

        let output_dir = instructions
            .single("OUTPUT_DIR")?
            .map(resolve)
            .unwrap_or_else(|| base.join(&defaults.output_dir));

        let top_k = match instructions.single("TOP_K")? {
            Some(value) => value.parse::<usize>().map_err(|e| {
                LexevalError::config(format!("TOP_K must be a positive integer, got '{value}': {e}"))
            })?,
            None => defaults.top_k,
        };
        if top_k == 0 {
            return Err(LexevalError::config("TOP_K must be at least 1"));
        }

        let report = instructions
            .single("REPORT")?
            .map(resolve)
            .unwrap_or_else(|| output_dir.join("REPORT.md"));

        Ok(PipelineConfig {
            queries,
            records,
            stopwords,
            output_dir,
            top_k,
            report,
        })
    }

    /// The stop filter for this run.
    pub fn stop_filter(&self) -> Result<StopFilter> {
        match &self.stopwords {
            Some(path) => StopFilter::from_file(path),
            None => Ok(StopFilter::new()),
        }
    }

    /// `QueryNumber;QueryText` file.
    pub fn queries_path(&self) -> PathBuf {
        self.output_dir.join("queries.csv")
    }

    /// `QueryNumber;DocNumber;DocVotes` file.
    pub fn expected_path(&self) -> PathBuf {
        self.output_dir.join("expected.csv")
    }

    pub fn inverted_list_path(&self, variant: Variant) -> PathBuf {
        self.output_dir
            .join(format!("inverted_list{}.csv", variant.suffix()))
    }

    pub fn model_path(&self, variant: Variant) -> PathBuf {
        self.output_dir.join(format!("model{}.json", variant.suffix()))
    }

    pub fn results_path(&self, variant: Variant) -> PathBuf {
        self.output_dir
            .join(format!("results{}.csv", variant.suffix()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_instructions() {
        let instructions = Instructions::parse(
            "# header\nQUERIES=\"data/q.xml\"  # trailing\nRECORDS=a.xml\nRECORDS=b.xml\n\nTOP_K=\nnonsense\n",
        );

        assert_eq!(instructions.single("QUERIES").unwrap(), Some("data/q.xml"));
        assert_eq!(instructions.all("RECORDS"), ["a.xml", "b.xml"]);
        assert_eq!(instructions.single("TOP_K").unwrap(), None);
        assert!(instructions.all("nonsense").is_empty());
    }

    #[test]
    fn test_repeated_single_key_is_an_error() {
        let instructions = Instructions::parse("QUERIES=a.xml\nQUERIES=b.xml");
        assert!(instructions.single("QUERIES").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.queries, PathBuf::from("data/cfquery.xml"));
        assert_eq!(config.records.len(), 6);
        assert_eq!(config.records[0], PathBuf::from("data/cf74.xml"));
        assert_eq!(config.records[5], PathBuf::from("data/cf79.xml"));
        assert_eq!(config.top_k, 40);
        assert_eq!(config.report, PathBuf::from("result/REPORT.md"));
        assert!(config.stopwords.is_none());
    }

    #[test]
    fn test_paths_resolve_against_base() {
        let config = PipelineConfig::from_instructions(
            "QUERIES=q.xml\nRECORDS=r1.xml\nRECORDS=/abs/r2.xml\nSTOPWORDS=stop.txt\nOUTPUT_DIR=out",
            Path::new("/work"),
        )
        .unwrap();

        assert_eq!(config.queries, PathBuf::from("/work/q.xml"));
        assert_eq!(
            config.records,
            vec![PathBuf::from("/work/r1.xml"), PathBuf::from("/abs/r2.xml")]
        );
        assert_eq!(config.stopwords, Some(PathBuf::from("/work/stop.txt")));
        assert_eq!(config.report, PathBuf::from("/work/out/REPORT.md"));
    }

    #[test]
    fn test_variant_paths() {
        let config = PipelineConfig::from_instructions("", Path::new("/w")).unwrap();
        assert_eq!(config.queries_path(), PathBuf::from("/w/result/queries.csv"));
        assert_eq!(config.expected_path(), PathBuf::from("/w/result/expected.csv"));
        assert_eq!(
            config.inverted_list_path(Variant::Plain),
            PathBuf::from("/w/result/inverted_list.csv")
        );
        assert_eq!(
            config.model_path(Variant::Stemmed),
            PathBuf::from("/w/result/model.stemmed.json")
        );
        assert_eq!(
            config.results_path(Variant::Stemmed),
            PathBuf::from("/w/result/results.stemmed.csv")
        );
    }

    #[test]
    fn test_invalid_top_k() {
        let base = Path::new("/w");
        assert!(PipelineConfig::from_instructions("TOP_K=abc", base).is_err());
        assert!(PipelineConfig::from_instructions("TOP_K=0", base).is_err());
        assert!(PipelineConfig::from_instructions("TOP_K=5\nTOP_K=6", base).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lexeval.cfg");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "OUTPUT_DIR=out").unwrap();
        writeln!(file, "REPORT=docs/REPORT.md").unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert_eq!(config.report, dir.path().join("docs/REPORT.md"));
        assert_eq!(config.queries, dir.path().join("data/cfquery.xml"));
    }

    #[test]
    fn test_missing_file() {
        assert!(PipelineConfig::from_file("/nonexistent/lexeval.cfg").is_err());
    }
}
