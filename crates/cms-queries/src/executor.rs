//! Query execution seam
//!
//! The engine never talks to a database; whatever runs a [`QuerySpec`]
//! implements this trait. Driver failures come back as
//! `CmsError::QueryExecution`.

use async_trait::async_trait;
use cms_core::models::AssetRecord;
use cms_core::result::CmsResult;

use crate::builder::QuerySpec;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run [`QuerySpec::sql`] and decode the asset rows
    async fn fetch_assets(&self, spec: &QuerySpec) -> CmsResult<Vec<AssetRecord>>;

    /// Run [`QuerySpec::count_sql`]
    async fn count(&self, spec: &QuerySpec) -> CmsResult<i64>;
}
