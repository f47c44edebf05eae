//! Base contract system
//!
//! A contract validates a record before it is written. Failures are
//! reported as [`ValidationErrors`] and block the write.

use cms_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Pre-write hook.
///
/// `normalize` fills derived values before validation, `finish` applies
/// overrides that must not influence validation. Returns the record as it
/// should be persisted.
pub trait Check<T>: Contract<T> {
    fn normalize(&self, entity: T) -> T {
        entity
    }

    fn finish(&self, entity: T) -> T {
        entity
    }

    fn check(&self, entity: T) -> Result<T, ValidationErrors> {
        let entity = self.normalize(entity);
        self.validate(&entity)?;
        Ok(self.finish(entity))
    }
}
