use std::sync::Arc;

use tracing::info;

use crate::domain::entities::view::ViewOptions;
use crate::usecase::ports::source::{RecordSource, SourceError};
use crate::usecase::services::data_view::DataView;

pub struct BrowseService<T> {
    source: Arc<dyn RecordSource<Record = T>>,
}

impl<T> BrowseService<T> {
    pub fn new(source: Arc<dyn RecordSource<Record = T>>) -> Self {
        Self { source }
    }

    /// Loads the source once and builds a fresh view over it.
    pub fn open(&self, options: ViewOptions) -> Result<DataView<T>, SourceError> {
        let records = self.source.load()?;
        info!(records = records.len(), "loaded records");
        Ok(DataView::with_options(records, options))
    }
}
