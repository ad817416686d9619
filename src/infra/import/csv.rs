use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::record::{FieldValue, Row};
use crate::usecase::ports::source::{RecordSource, SourceError};

pub struct CsvSource {
    pub csv_path: PathBuf,
}

impl CsvSource {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }
}

impl RecordSource for CsvSource {
    type Record = Row;

    fn load(&self) -> Result<Vec<Row>, SourceError> {
        read_csv_file(&self.csv_path).map_err(SourceError::from_anyhow)
    }
}

pub fn read_csv_file(csv_path: &Path) -> Result<Vec<Row>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    read_csv_rows(reader)
        .with_context(|| format!("failed to read csv: {}", csv_path.display()))
}

pub fn read_csv<R: Read>(input: R) -> Result<Vec<Row>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_csv_rows(reader)
}

fn read_csv_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Row>> {
    let headers = reader
        .headers()
        .context("failed to read csv headers")?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to parse csv record {row_idx}"))?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let value = record.get(col_idx).map_or(FieldValue::Null, FieldValue::infer);
                (name, value)
            })
            .collect::<Row>();
        rows.push(row);
    }

    Ok(rows)
}
