use crate::usecase::ports::source::{RecordSource, SourceError};

/// Source over records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource<T> {
    records: Vec<T>,
}

impl<T> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T: Clone + Send + Sync> RecordSource for MemorySource<T> {
    type Record = T;

    fn load(&self) -> Result<Vec<T>, SourceError> {
        Ok(self.records.clone())
    }
}
