//! Base service traits

use async_trait::async_trait;

use crate::result::ServiceResult;

/// A service invoked once per request
#[async_trait]
pub trait Callable<Params, Output>: Send + Sync {
    /// Execute the service
    async fn call(&self, params: Params) -> ServiceResult<Output>;
}
