//! Collaborator interfaces
//!
//! The list engine and the record services only ever reach the ACL
//! evaluator, the action catalogue and the persistence layer through
//! these traits.

use async_trait::async_trait;

use crate::models::DebugAction;
use crate::result::CmsResult;

/// Primary key type
pub type Id = i64;

/// Source of the permission actions a component declares.
///
/// Actions come back in display order; the order is kept in the grant
/// matrix built for each asset.
pub trait PermissionsSource: Send + Sync {
    fn actions(&self, component: Option<&str>) -> Vec<DebugAction>;
}

/// ACL evaluator for user groups.
pub trait AccessChecker: Send + Sync {
    /// Whether `group_id` is granted `action` on the asset named `asset_name`.
    fn check_group(&self, group_id: Id, action: &str, asset_name: &str) -> bool;
}

/// Persistence for hierarchical records.
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    async fn find(&self, id: Id) -> CmsResult<Option<T>>;

    /// Delete a node. With `cascade_children` the whole subtree goes,
    /// otherwise the children move up one level. Returns `false` when
    /// no node with `id` exists.
    async fn delete(&self, id: Id, cascade_children: bool) -> CmsResult<bool>;

    /// Ids of every node below `id`, in tree order.
    async fn descendant_ids(&self, id: Id) -> CmsResult<Vec<Id>>;
}

/// Serialized assignment lists that reference menu items.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Remove the given menu item ids from every assignment list that
    /// holds one of them. Returns the number of lists rewritten.
    async fn remove_menu_items(&self, menu_item_ids: &[Id]) -> CmsResult<u64>;
}
