//! List query builder
//!
//! Turns a [`FilterState`] into a parameterized [`QuerySpec`] over the
//! nested-set asset table. Filter values are always bound; only the
//! allow-listed projection and ORDER BY criterion are written into the
//! query text.

use cms_core::result::CmsResult;
use tracing::debug;

use crate::columns::{AssetColumn, ColumnSet};
use crate::filters::FilterState;
use crate::sorts::SortCriterion;

/// Asset table with its alias
pub const ASSETS_TABLE: &str = "assets AS a";

/// Parameter for prepared statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl SqlParam {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlParam::Text(s) => Some(s),
            SqlParam::Int(_) => None,
        }
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(i64::from(value))
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

/// Row window of a paged listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// A query ready for an external driver.
///
/// Placeholders are PostgreSQL positional (`$1`, `$2`, ...). `params`
/// holds the filter values in placeholder order; when the listing is
/// paged, LIMIT and OFFSET follow as the last two placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub columns: ColumnSet,
    pub conditions: Vec<String>,
    pub order_by: SortCriterion,
    pub params: Vec<SqlParam>,
    pub page: Option<Page>,
}

impl QuerySpec {
    /// Conditions joined with AND, without the `WHERE` keyword
    pub fn where_clause(&self) -> Option<String> {
        if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.join(" AND "))
        }
    }

    fn where_sql(&self) -> String {
        self.where_clause()
            .map(|clause| format!(" WHERE {}", clause))
            .unwrap_or_default()
    }

    /// Full listing query text
    pub fn sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            self.columns.to_sql(),
            ASSETS_TABLE,
            self.where_sql(),
            self.order_by.to_sql()
        );
        if self.page.is_some() {
            let next = self.params.len() + 1;
            sql.push_str(&format!(" LIMIT ${} OFFSET ${}", next, next + 1));
        }
        sql
    }

    /// Every value to bind to [`QuerySpec::sql`], in order
    pub fn bind_params(&self) -> Vec<SqlParam> {
        let mut params = self.params.clone();
        if let Some(page) = self.page {
            params.push(SqlParam::Int(page.limit));
            params.push(SqlParam::Int(page.offset));
        }
        params
    }

    /// Total-row query; binds [`QuerySpec::params`] only
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}{}", ASSETS_TABLE, self.where_sql())
    }

    pub fn has_filters(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// Builds asset listing queries.
///
/// Holds only the projection; one engine can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ListQueryEngine {
    columns: ColumnSet,
}

impl ListQueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow the projection
    pub fn with_select(mut self, columns: impl IntoIterator<Item = AssetColumn>) -> Self {
        self.columns = ColumnSet::new(columns);
        self
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Build the listing query for `state`.
    ///
    /// Fails with `CmsError::InvalidFilter` when the ordering column or
    /// direction is outside the allow-list.
    pub fn build_query(&self, state: &FilterState) -> CmsResult<QuerySpec> {
        let state = state.normalized();
        let order_by = SortCriterion::from_request(&state.ordering, &state.direction)
            .inspect_err(|e| tracing::warn!(error = %e, "rejected list ordering"))?;

        let mut builder = ConditionBuilder::default();

        if !state.search.is_empty() {
            let pattern = format!("%{}%", state.search);
            let name = builder.bind(pattern.clone());
            let title = builder.bind(pattern);
            builder.push(format!("(a.name ILIKE {} OR a.title ILIKE {})", name, title));
        }

        if state.level_start > 0 {
            let level = builder.bind(state.level_start);
            builder.push(format!("a.level >= {}", level));
        }

        if state.level_end > 0 {
            let level = builder.bind(state.level_end);
            builder.push(format!("a.level <= {}", level));
        }

        if !state.component.is_empty() {
            let exact = builder.bind(state.component.clone());
            let nested = builder.bind(format!("{}.%", state.component));
            builder.push(format!("(a.name = {} OR a.name LIKE {})", exact, nested));
        }

        let page = (state.limit > 0).then_some(Page {
            limit: state.limit,
            offset: state.start,
        });

        let spec = QuerySpec {
            columns: self.columns.clone(),
            conditions: builder.conditions,
            order_by,
            params: builder.params,
            page,
        };

        debug!(
            conditions = spec.conditions.len(),
            params = spec.params.len(),
            order_by = %spec.order_by.to_sql(),
            "built asset list query"
        );

        Ok(spec)
    }
}

/// Collects conditions and hands out placeholders in bind order
#[derive(Default)]
struct ConditionBuilder {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl ConditionBuilder {
    fn bind(&mut self, value: impl Into<SqlParam>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }

    fn push(&mut self, condition: String) {
        self.conditions.push(condition);
    }
}
