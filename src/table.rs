//! `;`-separated tables shared by every pipeline stage.
//!
//! Each table starts with a header row whose names match the serde field
//! names of the row type, e.g. `QueryNumber;QueryText`.

use std::fs::{self, File};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{LexevalError, Result};

/// Field delimiter of every intermediate table.
pub const DELIMITER: u8 = b';';

/// Read every row of the table at `path`.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| {
        LexevalError::collection(format!("Cannot open '{}': {e}", path.display()))
    })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(file);

    reader
        .deserialize()
        .enumerate()
        .map(|(line, row)| {
            row.map_err(|e| {
                LexevalError::parse(format!(
                    "'{}' row {}: {e}",
                    path.display(),
                    line + 1
                ))
            })
        })
        .collect()
}

/// Write `rows` to `path`, creating parent directories as needed.
///
/// The header row is derived from the field names of `T`.
pub fn write_rows<T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "QueryNumber")]
        number: u32,
        #[serde(rename = "QueryText")]
        text: String,
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/queries.csv");
        let rows = vec![
            Row { number: 1, text: "what is cf".to_string() },
            Row { number: 2, text: "text; with delimiter".to_string() },
        ];

        assert_eq!(write_rows(&path, &rows).unwrap(), 2);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("QueryNumber;QueryText\n1;what is cf\n"));

        let back: Vec<Row> = read_rows(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_malformed_row_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "QueryNumber;QueryText\nabc;text\n").unwrap();

        let err = read_rows::<Row>(&path).unwrap_err();
        assert!(err.to_string().contains("bad.csv"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_rows::<Row>(Path::new("/nonexistent/x.csv")).unwrap_err();
        assert!(err.to_string().contains("Cannot open"));
    }
}
