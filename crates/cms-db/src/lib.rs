//! # cms-db
//!
//! Database layer for CMS RS.
//!
//! PostgreSQL access through SQLx:
//!
//! - Connection pool management
//! - Execution of asset listing queries
//! - Nested-set menu item storage
//! - Module menu assignments and user groups
//!
//! ## Tables
//!
//! ```text
//! assets      (id BIGINT, parent_id BIGINT, name TEXT, title TEXT,
//!              level INTEGER, lft INTEGER, rgt INTEGER)
//! menu        (id BIGSERIAL, parent_id BIGINT, title TEXT, alias TEXT,
//!              home BOOLEAN, published INTEGER, publish_up TIMESTAMPTZ,
//!              publish_down TIMESTAMPTZ, level INTEGER, lft INTEGER, rgt INTEGER)
//! modules     (id BIGINT, client_id INTEGER, menu_assignment TEXT)
//! usergroups  (id BIGINT, parent_id BIGINT, title TEXT, lft INTEGER, rgt INTEGER)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use cms_db::{AssetQueryExecutor, Database, DatabaseConfig};
//!
//! let db = Database::connect(&DatabaseConfig::from(&config.database)).await?;
//! let executor = AssetQueryExecutor::new(db.pool().clone());
//! ```

pub mod menu_items;
pub mod module_assignments;
pub mod pool;
pub mod query_executor;
pub mod repository;
pub mod user_groups;

// Re-exports
pub use menu_items::{MenuItemRepository, MenuItemRow, NodeBounds};
pub use module_assignments::{prune_assignment, ModuleAssignmentRepository, ModuleAssignmentRow};
pub use pool::{Database, DatabaseConfig};
pub use query_executor::AssetQueryExecutor;
pub use repository::{RepositoryError, RepositoryResult};
pub use user_groups::{UserGroupRepository, UserGroupRow};
