//! Streaming parsers for the collection's XML files.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::collection::collapse_whitespace;
use crate::collection::query::{Query, QueryTopic, RelevanceJudgment, votes_from_score};
use crate::collection::record::Record;
use crate::error::{LexevalError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordField {
    Number,
    Abstract,
    Extract,
}

#[derive(Debug, Default)]
struct RecordBuilder {
    number: String,
    abstract_text: Option<String>,
    extract: Option<String>,
}

impl RecordBuilder {
    fn open(&mut self, field: RecordField) {
        match field {
            RecordField::Number => {}
            RecordField::Abstract => {
                self.abstract_text.get_or_insert_with(String::new);
            }
            RecordField::Extract => {
                self.extract.get_or_insert_with(String::new);
            }
        }
    }

    fn push(&mut self, field: RecordField, text: &str) {
        let target = match field {
            RecordField::Number => &mut self.number,
            RecordField::Abstract => self.abstract_text.get_or_insert_with(String::new),
            RecordField::Extract => self.extract.get_or_insert_with(String::new),
        };
        target.push(' ');
        target.push_str(text);
    }

    /// `None` for records with neither an abstract nor an extract.
    fn finish(self) -> Result<Option<Record>> {
        let number = parse_number("RECORDNUM", &self.number)?;
        let Some(text) = self.abstract_text.or(self.extract) else {
            debug!("Skipping record {number} without ABSTRACT or EXTRACT");
            return Ok(None);
        };
        Ok(Some(Record::new(number, collapse_whitespace(&text))))
    }
}

fn parse_number(element: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LexevalError::collection(format!("Missing {element}")));
    }
    trimmed.parse::<u32>().map_err(|e| {
        LexevalError::collection(format!("Invalid {element} '{trimmed}': {e}"))
    })
}

fn text_of<'a>(event: &'a Event<'_>) -> Result<Option<Cow<'a, str>>> {
    match event {
        Event::Text(text) => Ok(Some(text.unescape()?)),
        Event::CData(data) => Ok(Some(String::from_utf8_lossy(data))),
        _ => Ok(None),
    }
}

/// Parse the `<RECORD>` elements of a record file.
///
/// The document text is the `ABSTRACT`, falling back to the `EXTRACT`;
/// records with neither are skipped.
pub fn parse_records(xml: &str) -> Result<Vec<Record>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<RecordBuilder> = None;
    let mut field: Option<RecordField> = None;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(start) => {
                let opened = match start.name().as_ref() {
                    b"RECORD" => {
                        current = Some(RecordBuilder::default());
                        None
                    }
                    b"RECORDNUM" => Some(RecordField::Number),
                    b"ABSTRACT" => Some(RecordField::Abstract),
                    b"EXTRACT" => Some(RecordField::Extract),
                    _ => None,
                };
                if let (Some(opened), Some(builder)) = (opened, current.as_mut()) {
                    builder.open(opened);
                    field = Some(opened);
                }
            }
            Event::End(end) => match end.name().as_ref() {
                b"RECORDNUM" | b"ABSTRACT" | b"EXTRACT" => field = None,
                b"RECORD" => {
                    if let Some(record) = current.take().map(RecordBuilder::finish).transpose()? {
                        records.extend(record);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {
                if let (Some(field), Some(builder)) = (field, current.as_mut()) {
                    if let Some(text) = text_of(&event)? {
                        builder.push(field, &text);
                    }
                }
            }
        }
    }

    Ok(records)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryField {
    Number,
    Text,
    Item,
}

#[derive(Debug, Default)]
struct TopicBuilder {
    number: String,
    text: String,
    items: Vec<(String, u32)>,
}

impl TopicBuilder {
    fn finish(self) -> Result<QueryTopic> {
        let number = parse_number("QueryNumber", &self.number)?;
        let judgments = self
            .items
            .into_iter()
            .map(|(document, votes)| {
                Ok(RelevanceJudgment {
                    query: number,
                    document: parse_number("Item", &document)?,
                    votes,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryTopic {
            query: Query::new(number, collapse_whitespace(&self.text)),
            judgments,
        })
    }
}

/// Parse the `<QUERY>` elements of a query file.
///
/// Every `<Item score="...">` inside `<Records>` becomes a judgment whose
/// votes are the number of non-zero expert grades in `score`.
pub fn parse_queries(xml: &str) -> Result<Vec<QueryTopic>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut topics = Vec::new();
    let mut current: Option<TopicBuilder> = None;
    let mut field: Option<QueryField> = None;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(start) => match start.name().as_ref() {
                b"QUERY" => current = Some(TopicBuilder::default()),
                b"QueryNumber" => field = Some(QueryField::Number),
                b"QueryText" => field = Some(QueryField::Text),
                b"Item" => {
                    let mut votes = 0;
                    for attribute in start.attributes() {
                        let attribute = attribute.map_err(quick_xml::Error::from)?;
                        if attribute.key.as_ref() == b"score" {
                            votes = votes_from_score(&attribute.unescape_value()?);
                        }
                    }
                    if let Some(builder) = current.as_mut() {
                        builder.items.push((String::new(), votes));
                    }
                    field = Some(QueryField::Item);
                }
                _ => {}
            },
            Event::End(end) => match end.name().as_ref() {
                b"QueryNumber" | b"QueryText" | b"Item" => field = None,
                b"QUERY" => {
                    if let Some(builder) = current.take() {
                        topics.push(builder.finish()?);
                    }
                }
                _ => {}
            },
            Event::Empty(empty) if empty.name().as_ref() == b"Item" => {
                warn!("Ignoring <Item/> without a document number");
            }
            Event::Eof => break,
            _ => {
                if let (Some(field), Some(builder)) = (field, current.as_mut()) {
                    if let Some(text) = text_of(&event)? {
                        let target = match field {
                            QueryField::Number => &mut builder.number,
                            QueryField::Text => &mut builder.text,
                            QueryField::Item => match builder.items.last_mut() {
                                Some((document, _)) => document,
                                None => continue,
                            },
                        };
                        target.push(' ');
                        target.push_str(&text);
                    }
                }
            }
        }
    }

    Ok(topics)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        LexevalError::collection(format!("Cannot read '{}': {e}", path.display()))
    })
}

fn with_file<T>(path: &Path, result: Result<T>) -> Result<T> {
    result.map_err(|e| LexevalError::collection(format!("'{}': {e}", path.display())))
}

/// Read and concatenate every record file, in the order given.
pub fn read_records<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for path in paths {
        let path = path.as_ref();
        let parsed = with_file(path, parse_records(&read_file(path)?))?;
        debug!("Read {} records from '{}'", parsed.len(), path.display());

        for record in parsed {
            if !seen.insert(record.number) {
                warn!(
                    "Record {} appears more than once (again in '{}')",
                    record.number,
                    path.display()
                );
            }
            records.push(record);
        }
    }

    Ok(records)
}

/// Read the query file.
pub fn read_queries(path: &Path) -> Result<Vec<QueryTopic>> {
    let topics = with_file(path, parse_queries(&read_file(path)?))?;
    debug!("Read {} queries from '{}'", topics.len(), path.display());
    Ok(topics)
}
