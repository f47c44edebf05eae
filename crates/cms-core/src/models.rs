//! Domain records shared across crates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::traits::Id;

/// A node of the nested-set asset tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: Id,
    pub name: String,
    pub title: String,
    pub level: i32,
    pub lft: i32,
    pub rgt: i32,
}

impl AssetRecord {
    /// Number of descendants, derived from the nested-set bounds
    pub fn descendant_count(&self) -> i32 {
        (self.rgt - self.lft - 1) / 2
    }

    pub fn is_leaf(&self) -> bool {
        self.rgt == self.lft + 1
    }
}

/// An asset together with its per-action grant matrix for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedAsset {
    #[serde(flatten)]
    pub asset: AssetRecord,
    /// Grant per action, in the order the actions were declared
    pub checks: IndexMap<String, bool>,
}

impl AnnotatedAsset {
    pub fn unchecked(asset: AssetRecord) -> Self {
        Self {
            asset,
            checks: IndexMap::new(),
        }
    }

    pub fn is_allowed(&self, action: &str) -> Option<bool> {
        self.checks.get(action).copied()
    }
}

/// A permission action as declared by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugAction {
    pub name: String,
    pub label: String,
}

impl DebugAction {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// User group being debugged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: Id,
    pub title: String,
}

/// A menu item node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<Id>,
    pub parent_id: Id,
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

impl Default for MenuItem {
    fn default() -> Self {
        Self {
            id: None,
            parent_id: 1,
            title: String::new(),
            alias: String::new(),
            home: false,
            published: 1,
            publish_up: None,
            publish_down: None,
            level: 1,
            lft: 0,
            rgt: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_nested_set_helpers() {
        let root = AssetRecord {
            id: 1,
            name: "root.1".into(),
            title: "Root Asset".into(),
            level: 0,
            lft: 0,
            rgt: 9,
        };
        assert_eq!(root.descendant_count(), 4);
        assert!(!root.is_leaf());

        let leaf = AssetRecord {
            lft: 3,
            rgt: 4,
            ..root
        };
        assert!(leaf.is_leaf());
        assert_eq!(leaf.descendant_count(), 0);
    }

    #[test]
    fn test_annotated_asset_serializes_flat() {
        let mut annotated = AnnotatedAsset::unchecked(AssetRecord {
            id: 7,
            name: "com_content".into(),
            title: "com_content".into(),
            level: 1,
            lft: 10,
            rgt: 11,
        });
        annotated.checks.insert("core.admin".into(), false);

        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["name"], "com_content");
        assert_eq!(json["checks"]["core.admin"], false);
        assert_eq!(annotated.is_allowed("core.admin"), Some(false));
        assert_eq!(annotated.is_allowed("core.edit"), None);
    }

    #[test]
    fn test_checks_serialize_in_insertion_order() {
        let mut annotated = AnnotatedAsset::unchecked(AssetRecord {
            id: 1,
            name: "root.1".into(),
            title: "Root Asset".into(),
            level: 0,
            lft: 0,
            rgt: 1,
        });
        annotated.checks.insert("core.login.site".into(), true);
        annotated.checks.insert("core.admin".into(), false);

        let json = serde_json::to_string(&annotated).unwrap();
        assert!(json.contains(r#""checks":{"core.login.site":true,"core.admin":false}"#));
    }
}
