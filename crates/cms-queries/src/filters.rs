//! List filter state
//!
//! A [`FilterState`] holds everything a request may say about the asset
//! listing: the named filters, the group being debugged, ordering and
//! paging. It is resolved once per request by the caller and never
//! mutated while a query is built.

use cms_core::traits::Id;
use serde::Deserialize;

/// Filter, ordering and paging state for the asset listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Substring matched against asset name and title
    pub search: String,
    /// Lowest tree level to include (0 = unbounded)
    pub level_start: i32,
    /// Highest tree level to include (0 = unbounded)
    pub level_end: i32,
    /// Restrict to one component and its sub-assets
    pub component: String,
    /// Group whose permissions are evaluated (0 = none)
    pub group_id: Id,
    /// Qualified ordering column, validated at build time
    pub ordering: String,
    /// `asc` or `desc`, validated at build time
    pub direction: String,
    /// Row offset
    pub start: i64,
    /// Page size (0 = all rows)
    pub limit: i64,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn levels(mut self, start: i32, end: i32) -> Self {
        self.level_start = start;
        self.level_end = end;
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    pub fn group(mut self, group_id: Id) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn order_by(mut self, ordering: impl Into<String>, direction: impl Into<String>) -> Self {
        self.ordering = ordering.into();
        self.direction = direction.into();
        self
    }

    pub fn page(mut self, start: i64, limit: i64) -> Self {
        self.start = start;
        self.limit = limit;
        self
    }

    /// Canonical form of this state.
    ///
    /// This is the only place the level range is clamped: an end level
    /// below the start level is raised to the start level. Text filters
    /// are trimmed, empty ordering and direction take their defaults, and
    /// negative paging values become 0. Query building and store keys
    /// both work on the normalized state.
    pub fn normalized(&self) -> FilterState {
        let mut state = self.clone();

        state.search = state.search.trim().to_string();
        state.component = state.component.trim().to_string();

        if state.level_end > 0 && state.level_end < state.level_start {
            state.level_end = state.level_start;
        }

        state.ordering = match state.ordering.trim() {
            "" => crate::sorts::OrderingField::default().column().to_string(),
            ordering => ordering.to_string(),
        };
        state.direction = match state.direction.trim() {
            "" => crate::sorts::SortDirection::default().as_str().to_string(),
            direction => direction.to_lowercase(),
        };

        state.start = state.start.max(0);
        state.limit = state.limit.max(0);
        state
    }

    /// True when no row-restricting filter is set
    pub fn is_unfiltered(&self) -> bool {
        let state = self.normalized();
        state.search.is_empty()
            && state.level_start <= 0
            && state.level_end <= 0
            && state.component.is_empty()
    }
}
