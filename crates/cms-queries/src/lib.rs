//! # cms-queries
//!
//! Asset list query engine for CMS RS.
//!
//! This crate turns request filter state into parameterized SQL over the
//! nested-set asset table and derives the store key used to memoize
//! listing results. It never executes anything itself.
//!
//! ## Structure
//!
//! - `filters` - Filter state and its normalization
//! - `sorts` - Ordering allow-list and directions
//! - `columns` - Selectable asset columns
//! - `builder` - Query building (`ListQueryEngine`, `QuerySpec`)
//! - `store_id` - Store keys for result memoization
//! - `executor` - The seam a database driver implements
//!
//! ## Example
//!
//! ```
//! use cms_queries::{store_key, FilterState, ListQueryEngine};
//!
//! let state = FilterState::new()
//!     .search("news")
//!     .order_by("a.lft", "asc");
//!
//! let spec = ListQueryEngine::new().build_query(&state).unwrap();
//! assert_eq!(
//!     spec.where_clause().as_deref(),
//!     Some("(a.name ILIKE $1 OR a.title ILIKE $2)")
//! );
//! assert_eq!(spec.params.len(), 2);
//!
//! let key = store_key("com_users.debuggroup", &state);
//! assert_eq!(key, store_key("com_users.debuggroup", &state));
//! ```

pub mod filters;
pub mod sorts;
pub mod columns;
pub mod builder;
pub mod store_id;
pub mod executor;

// Re-exports for convenience
pub use filters::FilterState;
pub use sorts::{OrderingField, SortCriterion, SortDirection};
pub use columns::{AssetColumn, ColumnSet};
pub use builder::{ListQueryEngine, Page, QuerySpec, SqlParam, ASSETS_TABLE};
pub use store_id::{store_key, CacheKey};
pub use executor::QueryExecutor;
