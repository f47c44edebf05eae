//! Delete contract for menu items

use cms_core::error::ValidationErrors;
use cms_core::models::MenuItem;

use crate::base::{Contract, ValidationResult};

/// Guards against removing nodes the menu tree depends on
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteMenuItemContract;

impl DeleteMenuItemContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<MenuItem> for DeleteMenuItemContract {
    fn validate(&self, entity: &MenuItem) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if entity.id.is_none() {
            errors.add_base("Cannot delete a menu item that was never saved");
        }

        if entity.level == 0 {
            errors.add_base("The menu tree root cannot be deleted");
        }

        if entity.home {
            errors.add("home", "the default menu item cannot be deleted");
        }

        errors.into_result()
    }
}
