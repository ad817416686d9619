use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{0}")]
    Message(String),
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),
}

impl SourceError {
    /// Flattens a loader error with its full context chain.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        SourceError::Message(format!("{err:#}"))
    }
}

/// Supplies the ordered sequence a view is built over.
///
/// Loading happens once; the view never calls back into its source.
pub trait RecordSource: Send + Sync {
    type Record;

    fn load(&self) -> Result<Vec<Self::Record>, SourceError>;
}
