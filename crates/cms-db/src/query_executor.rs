//! Query Executor
//!
//! Runs asset listing [`QuerySpec`]s against PostgreSQL. Parameters are
//! bound in placeholder order; the query text is used as built.

use async_trait::async_trait;
use cms_core::models::AssetRecord;
use cms_core::result::CmsResult;
use cms_queries::{QueryExecutor, QuerySpec, SqlParam};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryScalar};
use sqlx::{PgPool, Postgres, Row};

use crate::repository::{RepositoryError, RepositoryResult};

/// Query executor for the asset listing
#[derive(Clone)]
pub struct AssetQueryExecutor {
    pool: PgPool,
}

impl AssetQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, spec: &QuerySpec) -> RepositoryResult<Vec<AssetRecord>> {
        let sql = spec.sql();
        let params = spec.bind_params();

        let rows = bind_all(sqlx::query(&sql), &params)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(decode_asset)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::Database)
    }

    async fn count_rows(&self, spec: &QuerySpec) -> RepositoryResult<i64> {
        let sql = spec.count_sql();

        let total = bind_all_scalar(sqlx::query_scalar::<_, i64>(&sql), &spec.params)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

#[async_trait]
impl QueryExecutor for AssetQueryExecutor {
    async fn fetch_assets(&self, spec: &QuerySpec) -> CmsResult<Vec<AssetRecord>> {
        let assets = self.fetch_rows(spec).await.map_err(|e| {
            tracing::error!(error = %e, sql = %spec.sql(), "asset list query failed");
            e
        })?;
        Ok(assets)
    }

    async fn count(&self, spec: &QuerySpec) -> CmsResult<i64> {
        let total = self.count_rows(spec).await.map_err(|e| {
            tracing::error!(error = %e, sql = %spec.count_sql(), "asset count query failed");
            e
        })?;
        Ok(total)
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.clone()),
        };
    }
    query
}

fn bind_all_scalar<'q>(
    mut query: QueryScalar<'q, Postgres, i64, PgArguments>,
    params: &[SqlParam],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.clone()),
        };
    }
    query
}

/// Decode one asset row.
///
/// Columns left out of a narrowed projection decode to their defaults.
fn decode_asset(row: &PgRow) -> Result<AssetRecord, sqlx::Error> {
    Ok(AssetRecord {
        id: column_or_default(row, "id")?,
        name: column_or_default(row, "name")?,
        title: column_or_default(row, "title")?,
        level: column_or_default(row, "level")?,
        lft: column_or_default(row, "lft")?,
        rgt: column_or_default(row, "rgt")?,
    })
}

fn column_or_default<'r, T>(row: &'r PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres> + Default,
{
    match row.try_get::<T, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(T::default()),
        Err(e) => Err(e),
    }
}
