//! Menu item contracts

mod base;
mod delete;

pub use base::{make_alias, MenuItemContract};
pub use delete::DeleteMenuItemContract;
