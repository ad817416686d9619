use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_RESULTS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Desc)
    }

    /// Orients an ascending comparison. Equal stays equal, so a stable sort
    /// keeps ties in source order in both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Every option a view recognizes, with its defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub sort_by: Option<String>,
    pub direction: SortDirection,
    pub results_per_page: usize,
    /// Field names that take part in search. Empty means every field.
    pub search_fields: Vec<String>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort_by: None,
            direction: SortDirection::Asc,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            search_fields: Vec::new(),
        }
    }
}

impl ViewOptions {
    /// Defaults merged with caller overrides.
    pub fn merged(overrides: ViewOverrides) -> Self {
        overrides.apply(Self::default())
    }

    /// Restores the invariants a caller-built value may violate.
    pub(crate) fn normalized(mut self) -> Self {
        self.results_per_page = self.results_per_page.max(1);
        if self.sort_by.as_deref().is_some_and(str::is_empty) {
            self.sort_by = None;
        }
        self
    }
}

/// Partial options as read from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewOverrides {
    #[serde(default, alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub desc: Option<bool>,
    #[serde(default, alias = "resultsPerPage")]
    pub results_per_page: Option<i64>,
    #[serde(default, alias = "searchKeyWhitelist")]
    pub search_fields: Option<Vec<String>>,
}

impl ViewOverrides {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Layers `self` over `fallback`: fields set here win.
    pub fn or(self, fallback: ViewOverrides) -> Self {
        Self {
            sort_by: self.sort_by.or(fallback.sort_by),
            desc: self.desc.or(fallback.desc),
            results_per_page: self.results_per_page.or(fallback.results_per_page),
            search_fields: self.search_fields.or(fallback.search_fields),
        }
    }

    pub fn apply(self, base: ViewOptions) -> ViewOptions {
        let mut options = base;
        if let Some(sort_by) = self.sort_by {
            options.sort_by = Some(sort_by);
        }
        if let Some(desc) = self.desc {
            options.direction = SortDirection::from_descending(desc);
        }
        if let Some(results_per_page) = self.results_per_page {
            options.results_per_page = coerce_results_per_page(results_per_page);
        }
        if let Some(search_fields) = self.search_fields {
            options.search_fields = search_fields;
        }
        options.normalized()
    }
}

/// Page sizes below one are coerced to one; sizes past `usize::MAX` saturate.
pub fn coerce_results_per_page(value: i64) -> usize {
    if value <= 0 {
        return 1;
    }
    usize::try_from(value).unwrap_or(usize::MAX)
}
