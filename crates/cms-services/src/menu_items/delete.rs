//! Delete Service for Menu Items
//!
//! Removes a menu item (and optionally its subtree) and then drops every
//! removed id from the site modules' menu assignments.

use async_trait::async_trait;
use cms_contracts::menu_items::DeleteMenuItemContract;
use cms_contracts::Contract;
use cms_core::models::MenuItem;
use cms_core::traits::{AssignmentStore, Id, RecordStore};
use serde::Serialize;
use tracing::info;

use crate::base::Callable;
use crate::result::ServiceResult;

/// Which item to delete and what happens to its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMenuItemParams {
    pub id: Id,
    /// Delete the whole subtree instead of promoting the children
    pub cascade_children: bool,
}

impl DeleteMenuItemParams {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            cascade_children: false,
        }
    }

    pub fn with_children(mut self) -> Self {
        self.cascade_children = true;
        self
    }
}

/// What a successful delete removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// The item itself followed by any deleted descendants
    pub deleted_ids: Vec<Id>,
    /// Modules whose menu assignment was rewritten
    pub pruned_modules: u64,
}

/// Service for deleting menu items
///
/// # Example
/// ```ignore
/// let service = DeleteMenuItemService::new(menu_items, module_assignments);
/// let result = service.call(DeleteMenuItemParams::new(101).with_children()).await;
/// ```
pub struct DeleteMenuItemService<S, A> {
    store: S,
    assignments: A,
    contract: DeleteMenuItemContract,
}

impl<S, A> DeleteMenuItemService<S, A>
where
    S: RecordStore<MenuItem>,
    A: AssignmentStore,
{
    pub fn new(store: S, assignments: A) -> Self {
        Self {
            store,
            assignments,
            contract: DeleteMenuItemContract::new(),
        }
    }
}

#[async_trait]
impl<S, A> Callable<DeleteMenuItemParams, DeleteOutcome> for DeleteMenuItemService<S, A>
where
    S: RecordStore<MenuItem>,
    A: AssignmentStore,
{
    async fn call(&self, params: DeleteMenuItemParams) -> ServiceResult<DeleteOutcome> {
        let not_found = || {
            ServiceResult::failure_with_base_error(format!("Menu item {} not found", params.id))
        };

        let item = match self.store.find(params.id).await {
            Ok(Some(item)) => item,
            Ok(None) => return not_found(),
            Err(e) => return ServiceResult::from_error(e),
        };

        if let Err(errors) = self.contract.validate(&item) {
            return ServiceResult::failure(errors);
        }

        let mut deleted_ids = vec![params.id];
        if params.cascade_children {
            match self.store.descendant_ids(params.id).await {
                Ok(ids) => deleted_ids.extend(ids),
                Err(e) => return ServiceResult::from_error(e),
            }
        }

        match self.store.delete(params.id, params.cascade_children).await {
            Ok(true) => {}
            Ok(false) => return not_found(),
            Err(e) => return ServiceResult::from_error(e),
        }

        let pruned_modules = match self.assignments.remove_menu_items(&deleted_ids).await {
            Ok(count) => count,
            Err(e) => {
                return ServiceResult::from_error(e)
                    .with_message("Menu item deleted but module assignments were not updated")
            }
        };

        info!(
            id = params.id,
            deleted = deleted_ids.len(),
            pruned_modules,
            "menu item delete finished"
        );

        ServiceResult::success(DeleteOutcome {
            deleted_ids,
            pruned_modules,
        })
    }
}
