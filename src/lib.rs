//! Searchable, sortable, paginated views over in-memory record sequences.
//!
//! A [`DataView`] wraps an immutable sequence and derives its filtered, sorted
//! and paged projections on every read. Record sources and a plain-text
//! renderer sit around it as thin collaborators.

pub mod domain;
pub mod infra;
pub mod ui;
pub mod usecase;

pub use domain::entities::record::{FieldValue, Record, Row};
pub use domain::entities::view::{SortDirection, ViewOptions, ViewOverrides};
pub use usecase::ports::source::{RecordSource, SourceError};
pub use usecase::services::browse_service::BrowseService;
pub use usecase::services::data_view::DataView;
pub use usecase::services::serializer::{Identity, MapFn, Serializer};
