//! Evaluation stages wired to the files named by a [`PipelineConfig`].
//!
//! ```text
//! queries XML ──► process_queries ──► queries.csv + expected.csv
//! records XML ──► generate_inverted_list(V) ──► inverted_list{V}.csv
//! inverted_list{V}.csv ──► build_model(V) ──► model{V}.json
//! model{V}.json + queries.csv ──► run_searches(V) ──► results{V}.csv
//! expected.csv + results{V}.csv ──► write_report ──► REPORT.md
//! ```
//!
//! Every stage reads its inputs from disk, so stages can be rerun one at a
//! time.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::analysis::{CollectionAnalyzer, Variant};
use crate::collection::query::{read_queries_table, write_judgments, write_queries};
use crate::collection::{Query, RelevanceJudgment, read_queries, read_records};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::evaluation::Judgments;
use crate::index::{InvertedList, TermDocumentModel};
use crate::report::{Comparison, render};
use crate::search::results::{read_results, write_results};
use crate::search::{QueryResult, SearchEngine};

/// Outcome of [`process_queries`].
#[derive(Clone, Debug, Serialize)]
pub struct QueriesSummary {
    pub queries: usize,
    pub judgments: usize,
    pub relevant_judgments: usize,
    pub queries_path: PathBuf,
    pub expected_path: PathBuf,
}

/// Outcome of [`generate_inverted_list`].
#[derive(Clone, Debug, Serialize)]
pub struct InvertedListSummary {
    pub variant: Variant,
    pub records: usize,
    pub terms: usize,
    pub path: PathBuf,
}

/// Outcome of [`build_model`].
#[derive(Clone, Debug, Serialize)]
pub struct ModelSummary {
    pub variant: Variant,
    pub documents: usize,
    pub terms: usize,
    pub path: PathBuf,
}

/// Outcome of [`run_searches`].
#[derive(Clone, Debug, Serialize)]
pub struct SearchSummary {
    pub variant: Variant,
    pub queries: usize,
    pub queries_without_results: usize,
    pub path: PathBuf,
}

/// All stages of one variant.
#[derive(Clone, Debug, Serialize)]
pub struct VariantSummary {
    pub inverted_list: InvertedListSummary,
    pub model: ModelSummary,
    pub search: SearchSummary,
}

/// Outcome of [`run`].
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub queries: QueriesSummary,
    pub variants: Vec<VariantSummary>,
}

/// Outcome of [`write_report`].
#[derive(Clone, Debug, Serialize)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub evaluated_queries: usize,
    pub map_plain: f64,
    pub map_stemmed: f64,
}

/// Convert the query XML into `queries.csv` and `expected.csv`.
pub fn process_queries(config: &PipelineConfig) -> Result<QueriesSummary> {
    info!("Processing queries from '{}'", config.queries.display());

    let topics = read_queries(&config.queries)?;
    let mut queries: Vec<Query> = Vec::with_capacity(topics.len());
    let mut judgments: Vec<RelevanceJudgment> = Vec::new();
    for topic in topics {
        queries.push(topic.query);
        judgments.extend(topic.judgments);
    }

    let queries_path = config.queries_path();
    let expected_path = config.expected_path();
    write_queries(&queries_path, &queries)?;
    write_judgments(&expected_path, &judgments)?;

    let relevant_judgments = judgments.iter().filter(|j| j.is_relevant()).count();
    info!(
        "Wrote {} queries and {} judgments",
        queries.len(),
        judgments.len()
    );

    Ok(QueriesSummary {
        queries: queries.len(),
        judgments: judgments.len(),
        relevant_judgments,
        queries_path,
        expected_path,
    })
}

fn analyzer(config: &PipelineConfig, variant: Variant) -> Result<CollectionAnalyzer> {
    CollectionAnalyzer::new(variant, config.stop_filter()?)
}

/// Analyze every record and write the inverted list of `variant`.
pub fn generate_inverted_list(
    config: &PipelineConfig,
    variant: Variant,
) -> Result<InvertedListSummary> {
    info!(
        "Generating {variant} inverted list from {} record files",
        config.records.len()
    );

    let records = read_records(&config.records)?;
    let list = InvertedList::build(&records, &analyzer(config, variant)?)?;
    let path = config.inverted_list_path(variant);
    list.write(&path)?;

    info!("Wrote {} terms to '{}'", list.len(), path.display());
    Ok(InvertedListSummary {
        variant,
        records: records.len(),
        terms: list.len(),
        path,
    })
}

/// Weight the inverted list of `variant` and save the model.
pub fn build_model(config: &PipelineConfig, variant: Variant) -> Result<ModelSummary> {
    let source = config.inverted_list_path(variant);
    info!("Building {variant} model from '{}'", source.display());

    let list = InvertedList::read(&source)?;
    let model = TermDocumentModel::from_inverted_list(&list);
    let path = config.model_path(variant);
    model.save(&path)?;

    info!("Wrote model to '{}'", path.display());
    Ok(ModelSummary {
        variant,
        documents: model.document_count,
        terms: model.len(),
        path,
    })
}

/// Rank documents for every processed query with the `variant` model.
pub fn run_searches(config: &PipelineConfig, variant: Variant) -> Result<SearchSummary> {
    let model_path = config.model_path(variant);
    info!("Searching with {variant} model '{}'", model_path.display());

    let engine = SearchEngine::new(TermDocumentModel::load(&model_path)?);
    let analyzer = analyzer(config, variant)?;
    let queries = read_queries_table(&config.queries_path())?;

    let mut results = Vec::with_capacity(queries.len());
    for query in &queries {
        let terms = analyzer.terms(&query.text)?;
        let documents = engine.search(&terms, config.top_k);
        debug!(
            "Query {}: {} terms, {} results",
            query.number,
            terms.len(),
            documents.len()
        );
        results.push(QueryResult::new(query.number, documents));
    }

    let queries_without_results = results.iter().filter(|r| r.documents.is_empty()).count();
    if queries_without_results > 0 {
        warn!("{queries_without_results} {variant} queries returned no documents");
    }

    let path = config.results_path(variant);
    write_results(&path, &results)?;

    info!("Wrote results of {} queries to '{}'", results.len(), path.display());
    Ok(SearchSummary {
        variant,
        queries: results.len(),
        queries_without_results,
        path,
    })
}

/// Every stage except the report, for both variants.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let queries = process_queries(config)?;

    let variants = Variant::ALL
        .into_iter()
        .map(|variant| {
            Ok(VariantSummary {
                inverted_list: generate_inverted_list(config, variant)?,
                model: build_model(config, variant)?,
                search: run_searches(config, variant)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RunSummary { queries, variants })
}

/// Evaluate both result files against `expected.csv`.
pub fn compare(config: &PipelineConfig) -> Result<Comparison> {
    let judgments = Judgments::load(&config.expected_path())?;
    let plain = read_results(&config.results_path(Variant::Plain))?;
    let stemmed = read_results(&config.results_path(Variant::Stemmed))?;
    Ok(Comparison::new(&judgments, &plain, &stemmed))
}

/// Write the markdown report to `output`, or to the configured path.
pub fn write_report(config: &PipelineConfig, output: Option<&Path>) -> Result<ReportSummary> {
    let path = output.unwrap_or(&config.report).to_path_buf();
    info!("Writing report to '{}'", path.display());

    let comparison = compare(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, render(&comparison))?;

    Ok(ReportSummary {
        path,
        evaluated_queries: comparison.plain.queries.len(),
        map_plain: comparison.plain.mean_average_precision(),
        map_stemmed: comparison.stemmed.mean_average_precision(),
    })
}
