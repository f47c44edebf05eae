//! Result type aliases

use crate::error::CmsError;

/// Standard Result type for CMS operations
pub type CmsResult<T> = Result<T, CmsError>;
