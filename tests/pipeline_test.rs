//! End-to-end runs over a miniature CF-style collection.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use lexeval::analysis::Variant;
use lexeval::config::PipelineConfig;
use lexeval::error::Result;
use lexeval::evaluation::Judgments;
use lexeval::index::{InvertedList, TermDocumentModel};
use lexeval::pipeline;
use lexeval::search::results::read_results;

const RECORDS_74: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FILE>
<RECORD>
<RECORDNUM>00001</RECORDNUM>
<TITLE>Lung infections</TITLE>
<ABSTRACT>Infections of the lung caused by pseudomonas bacteria in children.</ABSTRACT>
</RECORD>
<RECORD>
<RECORDNUM>00002</RECORDNUM>
<EXTRACT>Infected patients showed improved pulmonary function.</EXTRACT>
</RECORD>
</FILE>
"#;

const RECORDS_75: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FILE>
<RECORD>
<RECORDNUM>00003</RECORDNUM>
<ABSTRACT>Sweat chloride testing remains the diagnostic standard.</ABSTRACT>
</RECORD>
<RECORD>
<RECORDNUM>00004</RECORDNUM>
<ABSTRACT>Pancreatic enzymes improve nutrition and growth.</ABSTRACT>
</RECORD>
<RECORD>
<RECORDNUM>00005</RECORDNUM>
<TITLE>Title only</TITLE>
</RECORD>
</FILE>
"#;

const QUERIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FILEQUERY>
<QUERY>
<QueryNumber>00001</QueryNumber>
<QueryText>lung infection</QueryText>
<Records>
<Item score="2222">1</Item>
<Item score="1100">2</Item>
</Records>
</QUERY>
<QUERY>
<QueryNumber>00002</QueryNumber>
<QueryText>sweat chloride test</QueryText>
<Records>
<Item score="2000">3</Item>
</Records>
</QUERY>
</FILEQUERY>
"#;

fn setup() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("cfquery.xml"), QUERIES).unwrap();
    fs::write(data.join("cf74.xml"), RECORDS_74).unwrap();
    fs::write(data.join("cf75.xml"), RECORDS_75).unwrap();

    let instructions = dir.path().join("lexeval.cfg");
    fs::write(
        &instructions,
        "# miniature collection\n\
         QUERIES=data/cfquery.xml\n\
         RECORDS=data/cf74.xml\n\
         RECORDS=data/cf75.xml\n\
         OUTPUT_DIR=result\n\
         TOP_K=10\n",
    )
    .unwrap();

    let config = PipelineConfig::from_file(&instructions).unwrap();
    (dir, config)
}

fn assert_exists(path: &Path) {
    assert!(path.is_file(), "missing {}", path.display());
}

#[test]
fn test_run_writes_every_intermediate_file() -> Result<()> {
    let (_dir, config) = setup();

    let summary = pipeline::run(&config)?;

    assert_eq!(summary.queries.queries, 2);
    assert_eq!(summary.queries.judgments, 3);
    assert_eq!(summary.variants.len(), 2);
    assert_eq!(summary.variants[0].inverted_list.records, 4);

    assert_exists(&config.queries_path());
    assert_exists(&config.expected_path());
    for variant in Variant::ALL {
        assert_exists(&config.inverted_list_path(variant));
        assert_exists(&config.model_path(variant));
        assert_exists(&config.results_path(variant));
    }
    assert!(
        config
            .results_path(Variant::Stemmed)
            .ends_with("result/results.stemmed.csv")
    );

    Ok(())
}

#[test]
fn test_stemming_conflates_inflections() -> Result<()> {
    let (_dir, config) = setup();
    pipeline::run(&config)?;

    let plain = InvertedList::read(&config.inverted_list_path(Variant::Plain))?;
    let stemmed = InvertedList::read(&config.inverted_list_path(Variant::Stemmed))?;

    assert_eq!(plain.get("infections"), Some(&[1][..]));
    assert_eq!(plain.get("infected"), Some(&[2][..]));
    assert_eq!(plain.get("infect"), None);
    assert_eq!(stemmed.get("infect"), Some(&[1, 2][..]));

    // stopwords never reach the index
    assert_eq!(plain.get("the"), None);
    assert!(!plain.documents().contains(&5));

    let model = TermDocumentModel::load(&config.model_path(Variant::Stemmed))?;
    assert_eq!(model.document_count, 4);
    Ok(())
}

#[test]
fn test_stemmed_search_finds_inflected_documents() -> Result<()> {
    let (_dir, config) = setup();
    pipeline::run(&config)?;

    let plain = read_results(&config.results_path(Variant::Plain))?;
    let stemmed = read_results(&config.results_path(Variant::Stemmed))?;

    let documents = |results: &[lexeval::search::QueryResult], query: u32| {
        let mut found: Vec<u32> = results
            .iter()
            .find(|r| r.query == query)
            .map(|r| r.documents.iter().map(|d| d.document).collect())
            .unwrap_or_default();
        found.sort();
        found
    };

    assert_eq!(documents(&plain, 1), vec![1]);
    assert_eq!(documents(&stemmed, 1), vec![1, 2]);
    assert_eq!(documents(&plain, 2), vec![3]);
    assert_eq!(documents(&stemmed, 2), vec![3]);

    let judgments = Judgments::load(&config.expected_path())?;
    assert_eq!(judgments.relevant(1).len(), 2);
    Ok(())
}

#[test]
fn test_report_compares_both_variants() -> Result<()> {
    let (_dir, config) = setup();
    pipeline::run(&config)?;

    let summary = pipeline::write_report(&config, None)?;
    assert_eq!(summary.path, config.report);
    assert_eq!(summary.evaluated_queries, 2);
    assert!((summary.map_plain - 0.75).abs() < 1e-9);
    assert!((summary.map_stemmed - 1.0).abs() < 1e-9);

    let report = fs::read_to_string(&config.report).unwrap();
    assert!(report.contains("Without stemming"));
    assert!(report.contains("With stemming"));
    assert!(report.contains("| MAP | 0.7500 | 1.0000 | +0.2500 |"));
    assert!(report.contains("| 1 | 0.5000 | 1.0000 | +0.5000 |"));
    assert!(report.contains("| 2 | 1.0000 | 1.0000 | +0.0000 |"));
    Ok(())
}

#[test]
fn test_report_is_deterministic() -> Result<()> {
    let (dir, config) = setup();
    pipeline::run(&config)?;

    let first = dir.path().join("first/REPORT.md");
    let second = dir.path().join("second/REPORT.md");
    pipeline::write_report(&config, Some(&first))?;
    pipeline::write_report(&config, Some(&second))?;

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
    Ok(())
}

#[test]
fn test_stages_can_be_resumed() -> Result<()> {
    let (_dir, config) = setup();

    pipeline::process_queries(&config)?;
    pipeline::generate_inverted_list(&config, Variant::Stemmed)?;
    pipeline::build_model(&config, Variant::Stemmed)?;
    let search = pipeline::run_searches(&config, Variant::Stemmed)?;

    assert_eq!(search.queries, 2);
    assert_eq!(search.queries_without_results, 0);
    assert!(!config.results_path(Variant::Plain).exists());
    Ok(())
}

#[test]
fn test_search_without_model_fails() {
    let (_dir, config) = setup();
    pipeline::process_queries(&config).unwrap();

    let err = pipeline::run_searches(&config, Variant::Plain).unwrap_err();
    assert!(err.to_string().contains("model.json"));
}

#[test]
fn test_custom_stopwords() -> Result<()> {
    let (dir, mut config) = setup();
    let stopwords = dir.path().join("stopwords.txt");
    fs::write(&stopwords, "# extra\nlung\nthe\nof\nby\nin\n").unwrap();
    config.stopwords = Some(stopwords);

    pipeline::generate_inverted_list(&config, Variant::Plain)?;
    let list = InvertedList::read(&config.inverted_list_path(Variant::Plain))?;

    assert_eq!(list.get("lung"), None);
    assert!(list.get("pseudomonas").is_some());
    Ok(())
}
