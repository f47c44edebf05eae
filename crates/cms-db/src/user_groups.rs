//! User groups repository

use cms_core::models::UserGroup;
use cms_core::traits::Id;
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

/// User group row from database
#[derive(Debug, Clone, FromRow)]
pub struct UserGroupRow {
    pub id: i64,
    pub parent_id: i64,
    pub title: String,
    pub lft: i32,
    pub rgt: i32,
}

impl From<UserGroupRow> for UserGroup {
    fn from(row: UserGroupRow) -> Self {
        UserGroup {
            id: row.id,
            title: row.title,
        }
    }
}

/// User group repository
pub struct UserGroupRepository {
    pool: PgPool,
}

impl UserGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The group being debugged
    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<UserGroupRow>> {
        let row = sqlx::query_as::<_, UserGroupRow>(
            r#"
            SELECT id, parent_id, title, lft, rgt
            FROM usergroups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
