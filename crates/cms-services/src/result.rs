//! Service Result type

use cms_core::error::{CmsError, ValidationErrors};
use std::fmt;

/// Outcome of a service call: a value, or the errors that prevented it
#[derive(Debug, Clone)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            message: None,
        }
    }

    /// Failed result with a single field error
    pub fn failure_with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::failure(errors)
    }

    /// Failed result with an error not tied to a field
    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    /// Failed result from a lower layer error.
    ///
    /// Validation errors are carried over as they are; anything else
    /// becomes a base error with the error's message.
    pub fn from_error(error: CmsError) -> Self {
        match error {
            CmsError::Validation(errors) => Self::failure(errors),
            other => Self::failure_with_base_error(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    /// Map the result if successful
    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            result: if self.success { self.result.map(f) } else { None },
            errors: self.errors,
            message: self.message,
        }
    }

    /// Convert into a plain `Result`
    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match (self.success, self.result) {
            (true, Some(value)) => Ok(value),
            (true, None) => {
                let mut errors = ValidationErrors::new();
                errors.add_base("Service succeeded but no result was returned");
                Err(errors)
            }
            (false, _) => Err(self.errors),
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(result: Result<T, ValidationErrors>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(errors) => ServiceResult::failure(errors),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.result, self.success) {
            (Some(result), true) => write!(f, "Success: {}", result),
            (None, true) => write!(f, "Success"),
            (_, false) => write!(f, "Failure: {}", self.errors.full_messages().join(", ")),
        }
    }
}
