//! Core error types for CMS RS
//!
//! Query-building, execution and record validation failures all surface
//! through [`CmsError`].

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all CMS operations
#[derive(Error, Debug)]
pub enum CmsError {
    /// An ordering field or direction outside the allow-list.
    #[error("Invalid filter: {field}={value:?} is not allowed")]
    InvalidFilter { field: &'static str, value: String },

    /// The database driver failed to run a query.
    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CmsError {
    pub fn invalid_filter(field: &'static str, value: impl Into<String>) -> Self {
        CmsError::InvalidFilter {
            field,
            value: value.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CmsError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            CmsError::InvalidFilter { .. } => 400,
            CmsError::Validation(_) => 422,
            CmsError::NotFound { .. } => 404,
            CmsError::QueryExecution(_) | CmsError::Config(_) | CmsError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CmsError::InvalidFilter { .. } => "invalid_filter",
            CmsError::QueryExecution(_) => "query_execution_failed",
            CmsError::Validation(_) => "validation_failed",
            CmsError::NotFound { .. } => "not_found",
            CmsError::Config(_) => "configuration_error",
            CmsError::Internal(_) => "internal_error",
        }
    }
}

/// Validation errors collection for record checks
#[derive(Error, Debug, Default, Clone, PartialEq)]
#[error("Validation errors: {errors:?} {base_errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> messages
    pub errors: BTreeMap<String, Vec<String>>,
    /// Errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_messages() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("publish_down", "must not be earlier than publish_up");
        errors.add_base("record is locked");

        assert!(errors.has_error("publish_down"));
        assert_eq!(
            errors.full_messages(),
            vec![
                "record is locked".to_string(),
                "publish_down must not be earlier than publish_up".to_string(),
            ]
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_error_codes() {
        let err = CmsError::invalid_filter("ordering", "a.rules");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "invalid_filter");
        assert!(err.to_string().contains("a.rules"));

        let err = CmsError::QueryExecution("connection refused".into());
        assert_eq!(err.error_code(), "query_execution_failed");

        let err = CmsError::not_found("menu item", 42);
        assert_eq!(err.to_string(), "Not found: menu item with id=42");
    }
}
