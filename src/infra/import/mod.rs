pub mod csv;
pub mod json;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::record::Row;
use crate::usecase::ports::source::{RecordSource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Picks a format from the file extension, ignoring case.
    pub fn detect(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension
            .parse()
            .map_err(|_| SourceError::UnsupportedFormat(path.display().to_string()))
    }
}

impl FromStr for FileFormat {
    type Err = SourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub fn open_file_source(path: &Path, format: FileFormat) -> Arc<dyn RecordSource<Record = Row>> {
    match format {
        FileFormat::Csv => Arc::new(csv::CsvSource::new(path)),
        FileFormat::Json => Arc::new(json::JsonSource::new(path)),
    }
}
