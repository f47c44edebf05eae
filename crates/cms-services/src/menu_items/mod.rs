//! Menu item services

pub mod delete;

pub use delete::{DeleteMenuItemParams, DeleteMenuItemService, DeleteOutcome};
