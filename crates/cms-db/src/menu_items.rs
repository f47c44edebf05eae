//! Menu items repository
//!
//! Menu items form a nested-set tree (`lft`, `rgt`, `level`). Every tree
//! write runs in one transaction with the affected rows locked.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cms_contracts::menu_items::MenuItemContract;
use cms_contracts::Check;
use cms_core::models::MenuItem;
use cms_core::result::CmsResult;
use cms_core::traits::{Id, RecordStore};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::{debug, info};

use crate::repository::{RepositoryError, RepositoryResult};

const MENU_COLUMNS: &str = "id, parent_id, title, alias, home, published, \
                            publish_up, publish_down, level, lft, rgt";

/// Menu item row from database
#[derive(Debug, Clone, FromRow)]
pub struct MenuItemRow {
    pub id: i64,
    pub parent_id: i64,
    pub title: String,
    pub alias: String,
    pub home: bool,
    pub published: i32,
    pub publish_up: Option<DateTime<Utc>>,
    pub publish_down: Option<DateTime<Utc>>,
    pub level: i32,
    pub lft: i32,
    pub rgt: i32,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: Some(row.id),
            parent_id: row.parent_id,
            title: row.title,
            alias: row.alias,
            home: row.home,
            published: row.published,
            publish_up: row.publish_up,
            publish_down: row.publish_down,
            level: row.level,
            lft: row.lft,
            rgt: row.rgt,
        }
    }
}

/// Bounds of one node in the nested set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBounds {
    pub lft: i32,
    pub rgt: i32,
}

impl NodeBounds {
    pub fn of(row: &MenuItemRow) -> RepositoryResult<Self> {
        let bounds = Self {
            lft: row.lft,
            rgt: row.rgt,
        };
        if bounds.rgt <= bounds.lft || bounds.width() % 2 != 0 {
            return Err(RepositoryError::CorruptTree(format!(
                "menu item {} has bounds [{}, {}]",
                row.id, row.lft, row.rgt
            )));
        }
        Ok(bounds)
    }

    /// Number of positions the node and its subtree occupy
    pub fn width(&self) -> i32 {
        self.rgt - self.lft + 1
    }

    /// How far nodes to the right move left once this node is deleted
    pub fn gap_after_delete(&self, cascade_children: bool) -> i32 {
        if cascade_children {
            self.width()
        } else {
            2
        }
    }
}

/// Menu item repository
pub struct MenuItemRepository {
    pool: PgPool,
    contract: MenuItemContract,
}

impl MenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            contract: MenuItemContract::new(),
        }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<MenuItemRow>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn lock_node(
        tx: &mut Transaction<'_, Postgres>,
        id: Id,
    ) -> RepositoryResult<Option<MenuItemRow>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Run the save check, then insert or update the item.
    ///
    /// New items are appended as the last child of their parent. For
    /// existing items only the non-tree columns are written.
    pub async fn save(&self, item: MenuItem) -> RepositoryResult<MenuItemRow> {
        let item = self.contract.check(item)?;

        match item.id {
            Some(id) => self.update(id, &item).await,
            None => self.insert(&item).await,
        }
    }

    async fn update(&self, id: Id, item: &MenuItem) -> RepositoryResult<MenuItemRow> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "UPDATE menu SET title = $2, alias = $3, home = $4, published = $5, \
             publish_up = $6, publish_down = $7 \
             WHERE id = $1 RETURNING {MENU_COLUMNS}"
        ))
        .bind(id)
        .bind(&item.title)
        .bind(&item.alias)
        .bind(item.home)
        .bind(item.published)
        .bind(item.publish_up)
        .bind(item.publish_down)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity: "menu item",
            id,
        })?;

        Ok(row)
    }

    async fn insert(&self, item: &MenuItem) -> RepositoryResult<MenuItemRow> {
        let mut tx = self.pool.begin().await?;

        let parent = Self::lock_node(&mut tx, item.parent_id)
            .await?
            .ok_or(RepositoryError::NotFound {
                entity: "parent menu item",
                id: item.parent_id,
            })?;
        let parent_bounds = NodeBounds::of(&parent)?;

        sqlx::query("UPDATE menu SET rgt = rgt + 2 WHERE rgt >= $1")
            .bind(parent_bounds.rgt)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE menu SET lft = lft + 2 WHERE lft > $1")
            .bind(parent_bounds.rgt)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "INSERT INTO menu (parent_id, title, alias, home, published, publish_up, \
             publish_down, level, lft, rgt) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {MENU_COLUMNS}"
        ))
        .bind(parent.id)
        .bind(&item.title)
        .bind(&item.alias)
        .bind(item.home)
        .bind(item.published)
        .bind(item.publish_up)
        .bind(item.publish_down)
        .bind(parent.level + 1)
        .bind(parent_bounds.rgt)
        .bind(parent_bounds.rgt + 1)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = row.id, parent_id = parent.id, "menu item inserted");
        Ok(row)
    }

    /// Delete a node; see [`RecordStore::delete`]
    pub async fn delete_node(&self, id: Id, cascade_children: bool) -> RepositoryResult<bool> {
        let mut tx = self.pool.begin().await?;

        let Some(node) = Self::lock_node(&mut tx, id).await? else {
            return Ok(false);
        };
        let bounds = NodeBounds::of(&node)?;

        if cascade_children {
            sqlx::query("DELETE FROM menu WHERE lft >= $1 AND rgt <= $2")
                .bind(bounds.lft)
                .bind(bounds.rgt)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query("DELETE FROM menu WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query(
                "UPDATE menu SET lft = lft - 1, rgt = rgt - 1, level = level - 1 \
                 WHERE lft > $1 AND rgt < $2",
            )
            .bind(bounds.lft)
            .bind(bounds.rgt)
            .execute(&mut *tx)
            .await?;
            sqlx::query("UPDATE menu SET parent_id = $1 WHERE parent_id = $2")
                .bind(node.parent_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        let gap = bounds.gap_after_delete(cascade_children);
        sqlx::query("UPDATE menu SET lft = lft - $1 WHERE lft > $2")
            .bind(gap)
            .bind(bounds.rgt)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE menu SET rgt = rgt - $1 WHERE rgt > $2")
            .bind(gap)
            .bind(bounds.rgt)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(id, cascade_children, "menu item deleted");
        Ok(true)
    }

    pub async fn find_descendant_ids(&self, id: Id) -> RepositoryResult<Vec<Id>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT child.id
            FROM menu AS node
            JOIN menu AS child ON child.lft > node.lft AND child.rgt < node.rgt
            WHERE node.id = $1
            ORDER BY child.lft ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

#[async_trait]
impl RecordStore<MenuItem> for MenuItemRepository {
    async fn find(&self, id: Id) -> CmsResult<Option<MenuItem>> {
        Ok(self.find_by_id(id).await?.map(MenuItem::from))
    }

    async fn delete(&self, id: Id, cascade_children: bool) -> CmsResult<bool> {
        Ok(self.delete_node(id, cascade_children).await?)
    }

    async fn descendant_ids(&self, id: Id) -> CmsResult<Vec<Id>> {
        Ok(self.find_descendant_ids(id).await?)
    }
}
