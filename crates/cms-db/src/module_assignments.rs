//! Module assignments repository
//!
//! Site modules keep the menu items they are shown on in a JSON
//! document, `{"assigned": [101, 102], ...}`. Deleting a menu item has to
//! remove its id from every such list.

use async_trait::async_trait;
use cms_core::result::CmsResult;
use cms_core::traits::{AssignmentStore, Id};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use crate::repository::RepositoryResult;

/// Module row carrying a menu assignment
#[derive(Debug, Clone, FromRow)]
pub struct ModuleAssignmentRow {
    pub id: i64,
    pub menu_assignment: String,
}

/// Remove `menu_item_ids` from the `assigned` list of an assignment document.
///
/// Returns the rewritten document, or `None` when the list referenced none
/// of the ids and the row should be left untouched. Other keys of the
/// document are preserved. Ids may be stored as numbers or numeric strings.
///
/// `assigned` may also be an object keyed by position
/// (`{"0": 101, "2": 103}`); it is read in key order and written back as
/// an array.
pub fn prune_assignment(
    menu_assignment: &str,
    menu_item_ids: &[Id],
) -> Result<Option<String>, serde_json::Error> {
    let mut document: Value = serde_json::from_str(menu_assignment)?;

    let Some(assigned) = document.get_mut("assigned") else {
        return Ok(None);
    };

    let entries: Vec<Value> = match assigned {
        Value::Array(items) => std::mem::take(items),
        Value::Object(map) => {
            let mut keyed: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            keyed.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
            keyed.into_iter().map(|(_, entry)| entry).collect()
        }
        _ => return Ok(None),
    };

    let before = entries.len();
    let kept: Vec<Value> = entries
        .into_iter()
        .filter(|entry| match assigned_id(entry) {
            Some(id) => !menu_item_ids.contains(&id),
            None => true,
        })
        .collect();

    if kept.len() == before {
        return Ok(None);
    }

    *assigned = Value::Array(kept);
    serde_json::to_string(&document).map(Some)
}

fn assigned_id(entry: &Value) -> Option<Id> {
    match entry {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Module assignment repository
pub struct ModuleAssignmentRepository {
    pool: PgPool,
}

impl ModuleAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rewrite the assignment of every site module that references one of
    /// `menu_item_ids`. Returns the number of modules updated.
    pub async fn prune_menu_items(&self, menu_item_ids: &[Id]) -> RepositoryResult<u64> {
        if menu_item_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, ModuleAssignmentRow>(
            r#"
            SELECT id, menu_assignment
            FROM modules
            WHERE client_id = 0 AND menu_assignment IS NOT NULL
            FOR UPDATE
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut updated = 0;
        for row in rows {
            let pruned = match prune_assignment(&row.menu_assignment, menu_item_ids) {
                Ok(pruned) => pruned,
                Err(e) => {
                    warn!(module_id = row.id, error = %e, "skipping unreadable menu assignment");
                    continue;
                }
            };

            if let Some(menu_assignment) = pruned {
                sqlx::query("UPDATE modules SET menu_assignment = $1 WHERE id = $2")
                    .bind(menu_assignment)
                    .bind(row.id)
                    .execute(&mut *tx)
                    .await?;
                updated += 1;
            }
        }

        tx.commit().await?;

        info!(menu_items = ?menu_item_ids, modules = updated, "pruned module assignments");
        Ok(updated)
    }
}

#[async_trait]
impl AssignmentStore for ModuleAssignmentRepository {
    async fn remove_menu_items(&self, menu_item_ids: &[Id]) -> CmsResult<u64> {
        Ok(self.prune_menu_items(menu_item_ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prune_removes_id() {
        let pruned = prune_assignment(r#"{"assigned":[101,102,103],"assignment":1}"#, &[102])
            .unwrap()
            .unwrap();

        let value: Value = serde_json::from_str(&pruned).unwrap();
        assert_eq!(value, json!({"assigned": [101, 103], "assignment": 1}));
    }

    #[test]
    fn test_prune_leaves_unrelated_sets_untouched() {
        assert_eq!(
            prune_assignment(r#"{"assigned":[101,103]}"#, &[102]).unwrap(),
            None
        );
        assert_eq!(prune_assignment(r#"{"assigned":[]}"#, &[102]).unwrap(), None);
        assert_eq!(prune_assignment(r#"{"assignment":0}"#, &[102]).unwrap(), None);
    }

    #[test]
    fn test_prune_handles_string_ids() {
        let pruned = prune_assignment(r#"{"assigned":["101","102"]}"#, &[101])
            .unwrap()
            .unwrap();

        let value: Value = serde_json::from_str(&pruned).unwrap();
        assert_eq!(value["assigned"], json!(["102"]));
    }

    #[test]
    fn test_prune_removes_every_occurrence_of_several_ids() {
        let pruned = prune_assignment(r#"{"assigned":[5,7,5,9]}"#, &[5, 9])
            .unwrap()
            .unwrap();

        let value: Value = serde_json::from_str(&pruned).unwrap();
        assert_eq!(value["assigned"], json!([7]));
    }

    #[test]
    fn test_prune_rewrites_keyed_object_as_array() {
        let pruned = prune_assignment(
            r#"{"assigned":{"0":101,"2":103,"10":110},"assignment":1}"#,
            &[103],
        )
        .unwrap()
        .unwrap();

        let value: Value = serde_json::from_str(&pruned).unwrap();
        assert_eq!(value, json!({"assigned": [101, 110], "assignment": 1}));

        assert_eq!(
            prune_assignment(r#"{"assigned":{"0":101}}"#, &[103]).unwrap(),
            None
        );
    }

    #[test]
    fn test_prune_rejects_invalid_json() {
        assert!(prune_assignment("not json", &[1]).is_err());
    }
}
