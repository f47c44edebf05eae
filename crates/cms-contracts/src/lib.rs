//! # cms-contracts
//!
//! Contract validation for CMS RS.
//!
//! Contracts validate records before they are written. A failed contract
//! blocks the write and reports user-visible validation errors; data is
//! never silently coerced into a valid shape.

pub mod base;
pub mod menu_items;

pub use base::*;
