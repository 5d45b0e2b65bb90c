//! Criterion benchmarks for lexeval.
//!
//! Covers the hot paths of a run:
//! - Porter stemming
//! - Collection analysis with and without stemming
//! - Model construction and cosine-similarity search

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexeval::analysis::{CollectionAnalyzer, Stemmer, Variant};
use lexeval::analysis::token_filter::PorterStemmer;
use lexeval::collection::Record;
use lexeval::index::{InvertedList, TermDocumentModel};
use lexeval::search::SearchEngine;

/// Generate abstract-like documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    let words = [
        "cystic",
        "fibrosis",
        "patients",
        "pseudomonas",
        "aeruginosa",
        "infection",
        "infections",
        "infected",
        "sputum",
        "mucus",
        "sweat",
        "chloride",
        "testing",
        "pancreatic",
        "enzymes",
        "pulmonary",
        "function",
        "children",
        "antibodies",
        "serum",
        "treatment",
        "the",
        "of",
        "and",
        "with",
        "in",
    ];

    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100);
        let doc_words: Vec<&str> = (0..doc_length)
            .map(|j| words[(i * 7 + j * 13) % words.len()])
            .collect();
        documents.push(doc_words.join(" "));
    }

    documents
}

fn bench_stemming(c: &mut Criterion) {
    let mut group = c.benchmark_group("stemming");
    let stemmer = PorterStemmer;
    let words = [
        "relational",
        "conditional",
        "generalizations",
        "infections",
        "hopefulness",
        "electricity",
        "adjustment",
        "controlling",
    ];

    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("porter", |b| {
        b.iter(|| {
            for word in &words {
                black_box(stemmer.stem(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let texts = generate_test_documents(100);

    for variant in Variant::ALL {
        let analyzer = CollectionAnalyzer::with_default_stop_words(variant).unwrap();
        group.throughput(Throughput::Elements(texts.len() as u64));
        group.bench_function(format!("analyze_{variant}"), |b| {
            b.iter(|| {
                for text in &texts {
                    let _ = black_box(analyzer.terms(black_box(text)));
                }
            })
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let records: Vec<Record> = generate_test_documents(1000)
        .into_iter()
        .enumerate()
        .map(|(i, text)| Record::new(i as u32 + 1, text))
        .collect();
    let analyzer = CollectionAnalyzer::with_default_stop_words(Variant::Stemmed).unwrap();
    let list = InvertedList::build(&records, &analyzer).unwrap();

    group.bench_function("build_model", |b| {
        b.iter(|| black_box(TermDocumentModel::from_inverted_list(black_box(&list))))
    });

    let engine = SearchEngine::new(TermDocumentModel::from_inverted_list(&list));
    let query = analyzer
        .terms("pseudomonas infections in the sputum of children")
        .unwrap();
    group.bench_function("cosine_top_40", |b| {
        b.iter(|| black_box(engine.search(black_box(&query), 40)))
    });

    group.finish();
}

criterion_group!(benches, bench_stemming, bench_analysis, bench_search);
criterion_main!(benches);
