//! # cms-core
//!
//! Core types, traits, and utilities for CMS RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type aliases
//! - Collaborator traits (permissions source, ACL checker, record store)
//! - Shared domain records
//! - Pagination types
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod models;
pub mod pagination;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
pub use models::*;
pub use pagination::*;
