//! Access checking without a rule set

use cms_core::traits::{AccessChecker, Id};

/// Checker for a host with no ACL rules loaded: nothing is granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitDeny;

impl AccessChecker for ImplicitDeny {
    fn check_group(&self, _group_id: Id, _action: &str, _asset_name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_is_granted() {
        assert!(!ImplicitDeny.check_group(8, "core.admin", "root.1"));
        assert!(!ImplicitDeny.check_group(1, "core.login.site", "com_content"));
    }
}
