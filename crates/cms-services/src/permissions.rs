//! Static action catalogue
//!
//! Every component shares the core actions; a component may declare
//! further actions of its own, listed after the core set.

use cms_core::models::DebugAction;
use cms_core::traits::PermissionsSource;
use std::collections::HashMap;

const CORE_ACTIONS: [(&str, &str); 12] = [
    ("core.login.site", "Site Login"),
    ("core.login.admin", "Administrator Login"),
    ("core.login.api", "Web Services Login"),
    ("core.login.offline", "Offline Access"),
    ("core.admin", "Super User"),
    ("core.options", "Configure Options Only"),
    ("core.manage", "Access Administration Interface"),
    ("core.create", "Create"),
    ("core.delete", "Delete"),
    ("core.edit", "Edit"),
    ("core.edit.state", "Edit State"),
    ("core.edit.own", "Edit Own"),
];

/// [`PermissionsSource`] backed by an in-memory table
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionsSource {
    component_actions: HashMap<String, Vec<DebugAction>>,
}

impl StaticPermissionsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare extra actions for `component`
    pub fn with_component_actions(
        mut self,
        component: impl Into<String>,
        actions: impl IntoIterator<Item = DebugAction>,
    ) -> Self {
        self.component_actions
            .entry(component.into())
            .or_default()
            .extend(actions);
        self
    }

    pub fn core_actions() -> Vec<DebugAction> {
        CORE_ACTIONS
            .iter()
            .map(|(name, label)| DebugAction::new(*name, *label))
            .collect()
    }
}

impl PermissionsSource for StaticPermissionsSource {
    fn actions(&self, component: Option<&str>) -> Vec<DebugAction> {
        let mut actions = Self::core_actions();

        if let Some(extra) = component.and_then(|c| self.component_actions.get(c)) {
            actions.extend(extra.iter().cloned());
        }

        actions
    }
}
