use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::entities::record::{search_haystack, Record, SEARCH_SEPARATOR};
use crate::domain::entities::view::{coerce_results_per_page, SortDirection, ViewOptions};
use crate::usecase::services::serializer::{Identity, MapFn, Serializer};

/// Searchable, sortable, paginated view over an immutable record sequence.
///
/// Every derived read (`filtered_results`, `paged_results`, `page_ceiling`,
/// `page_index_list`) is recomputed from the current state; nothing is cached.
/// Setters never fail: out-of-range input is coerced or ignored, so the view
/// can be driven straight from UI events.
pub struct DataView<T, S = Identity> {
    source: Arc<[T]>,
    options: ViewOptions,
    serializer: S,
    search_value: String,
    current_page: usize,
}

impl<T> DataView<T, Identity> {
    pub fn new(source: impl Into<Arc<[T]>>) -> Self {
        Self::with_options(source, ViewOptions::default())
    }

    pub fn with_options(source: impl Into<Arc<[T]>>, options: ViewOptions) -> Self {
        Self {
            source: source.into(),
            options: options.normalized(),
            serializer: Identity,
            search_value: String::new(),
            current_page: 1,
        }
    }
}

impl<T, S> DataView<T, S> {
    /// Maps every handed-out record through `map`. State carries over.
    pub fn serialize_with<U, F>(self, map: F) -> DataView<T, MapFn<F, U>>
    where
        F: Fn(&T) -> U,
    {
        DataView {
            source: self.source,
            options: self.options,
            serializer: MapFn::new(map),
            search_value: self.search_value,
            current_page: self.current_page,
        }
    }

    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Back to the construction state: no search text, first page.
    pub fn reset(&mut self) {
        self.search_value.clear();
        self.current_page = 1;
    }

    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.search_value = value.into();
    }

    pub fn search_fields(&self) -> &[String] {
        &self.options.search_fields
    }

    /// Restricts search to the named fields; an empty list searches all of them.
    pub fn set_search_fields<I, N>(&mut self, fields: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.options.search_fields = fields.into_iter().map(Into::into).collect();
    }

    pub fn sort_by_key(&self) -> Option<&str> {
        self.options.sort_by.as_deref()
    }

    /// An empty key turns sorting off.
    pub fn set_sort_by_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.options.sort_by = if key.is_empty() { None } else { Some(key) };
    }

    pub fn is_sort_by_key(&self, key: &str) -> bool {
        self.sort_by_key() == Some(key)
    }

    pub fn sort_descending(&self) -> bool {
        self.options.direction.is_descending()
    }

    pub fn set_sort_descending(&mut self, descending: bool) {
        self.options.direction = SortDirection::from_descending(descending);
    }

    pub fn results_per_page(&self) -> usize {
        self.options.results_per_page
    }

    /// Values below one are coerced to one. The current page is not moved.
    pub fn set_results_per_page(&mut self, value: i64) {
        let size = coerce_results_per_page(value);
        if i64::try_from(size).ok() != Some(value) {
            debug!(value, size, "coercing results per page");
        }
        self.options.results_per_page = size;
    }

    pub fn current_page_number(&self) -> usize {
        self.current_page
    }
}

impl<T: Record, S> DataView<T, S> {
    fn matches(&self) -> Vec<&T> {
        let needle = self.search_value.to_lowercase();
        let whitelist = &self.options.search_fields;
        // A needle holding the separator could only match across two values.
        let searchable = !needle.contains(SEARCH_SEPARATOR);

        let mut matched: Vec<&T> = self
            .source
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || (searchable && search_haystack(*record, whitelist).contains(&needle))
            })
            .collect();

        if let Some(key) = self.options.sort_by.as_deref() {
            let direction = self.options.direction;
            let mut keyed: Vec<_> = matched
                .into_iter()
                .map(|record| (record.field(key).unwrap_or_default(), record))
                .collect();
            // `sort_by` is stable: ties keep source order.
            keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp_native(b)));
            matched = keyed.into_iter().map(|(_, record)| record).collect();
        }

        trace!(
            total = self.source.len(),
            matched = matched.len(),
            sort_by = ?self.options.sort_by,
            "derived view"
        );
        matched
    }

    pub fn filtered_len(&self) -> usize {
        self.matches().len()
    }

    /// Number of pages for the current filtered length; zero when nothing matches.
    pub fn page_ceiling(&self) -> usize {
        self.filtered_len().div_ceil(self.options.results_per_page)
    }

    /// `[1, ..., page_ceiling]`, for rendering page selectors.
    pub fn page_index_list(&self) -> Vec<usize> {
        (1..=self.page_ceiling()).collect()
    }

    /// Applies only when `1 <= candidate <= page_ceiling`.
    pub fn set_current_page_number(&mut self, candidate: i64) {
        let ceiling = self.page_ceiling();
        match usize::try_from(candidate) {
            Ok(page) if (1..=ceiling).contains(&page) => {
                self.current_page = page;
                debug!(page, ceiling, "current page changed");
            }
            _ => debug!(candidate, ceiling, "ignoring out-of-range page number"),
        }
    }

    pub fn move_next_page(&mut self) {
        let next = self.current_page + 1;
        if next <= self.page_ceiling() {
            self.current_page = next;
        }
    }

    pub fn move_previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }
}

impl<T: Record, S: Serializer<T>> DataView<T, S> {
    /// Matching records in sort order, passed through the serializer.
    pub fn filtered_results<'a>(&'a self) -> Vec<S::Output<'a>> {
        self.matches()
            .into_iter()
            .map(|record| self.serializer.serialize(record))
            .collect()
    }

    /// The current page of [`DataView::filtered_results`]. A page past the
    /// ceiling (left behind by a narrower search) is empty.
    pub fn paged_results<'a>(&'a self) -> Vec<S::Output<'a>> {
        let matched = self.matches();
        matched
            .chunks(self.options.results_per_page)
            .nth(self.current_page - 1)
            .map(|page| {
                page.iter()
                    .map(|record| self.serializer.serialize(*record))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl<T, S> fmt::Debug for DataView<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataView")
            .field("records", &self.source.len())
            .field("options", &self.options)
            .field("search_value", &self.search_value)
            .field("current_page", &self.current_page)
            .finish_non_exhaustive()
    }
}
