use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::entities::record::{FieldValue, Row};
use crate::usecase::ports::source::{RecordSource, SourceError};

/// Reads a JSON document holding an array of flat objects.
pub struct JsonSource {
    pub json_path: PathBuf,
}

impl JsonSource {
    pub fn new(json_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
        }
    }
}

impl RecordSource for JsonSource {
    type Record = Row;

    fn load(&self) -> Result<Vec<Row>, SourceError> {
        read_json_file(&self.json_path).map_err(SourceError::from_anyhow)
    }
}

pub fn read_json_file(json_path: &Path) -> Result<Vec<Row>> {
    let file = File::open(json_path)
        .with_context(|| format!("failed to open json: {}", json_path.display()))?;
    read_json(BufReader::new(file))
        .with_context(|| format!("failed to read json: {}", json_path.display()))
}

pub fn read_json<R: Read>(input: R) -> Result<Vec<Row>> {
    let document: Value = serde_json::from_reader(input).context("failed to parse json")?;
    let Value::Array(items) = document else {
        anyhow::bail!("json document must be an array of objects")
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(object) => Ok(object
                .into_iter()
                .map(|(name, value)| (name, field_value(value)))
                .collect::<Row>()),
            other => anyhow::bail!("json element {idx} is not an object: {other}"),
        })
        .collect()
}

/// Nested arrays and objects are flattened to their compact JSON text.
fn field_value(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::Bool(value) => FieldValue::Bool(value),
        Value::Number(number) => match number.as_i64() {
            Some(value) => FieldValue::Int(value),
            None => number
                .as_f64()
                .map_or_else(|| FieldValue::Text(number.to_string()), FieldValue::Float),
        },
        Value::String(value) => FieldValue::Text(value),
        nested @ (Value::Array(_) | Value::Object(_)) => FieldValue::Text(nested.to_string()),
    }
}
