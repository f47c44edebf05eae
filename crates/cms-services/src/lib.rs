//! # cms-services
//!
//! Services on top of the query engine and the record stores.
//!
//! - `debug_group` - the group permission listing (build, memoize,
//!   execute, annotate)
//! - `list_cache` - in-process memo of listing results
//! - `permissions` - the static action catalogue
//! - `access` - the checker used when no ACL rules are loaded
//! - `menu_items` - menu item deletion with assignment cleanup

pub mod access;
pub mod base;
pub mod debug_group;
pub mod list_cache;
pub mod menu_items;
pub mod permissions;
pub mod result;

pub use access::ImplicitDeny;
pub use base::Callable;
pub use debug_group::{DebugGroupService, DEFAULT_CONTEXT};
pub use list_cache::ListCache;
pub use permissions::StaticPermissionsSource;
pub use result::ServiceResult;
