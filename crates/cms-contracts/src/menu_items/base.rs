//! Save contract for menu items

use cms_core::error::ValidationErrors;
use cms_core::models::MenuItem;
use regex::Regex;
use std::sync::LazyLock;

use crate::base::{Check, Contract, ValidationResult};

/// Runs of characters that may not appear in an alias
static ALIAS_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("alias pattern is valid"));

const TITLE_MAX_CHARS: usize = 255;

/// Aliases reserved by the menu tree itself
const RESERVED_ALIASES: &[&str] = &["root"];

/// Build an alias from free text: lowercase letters and digits joined by
/// `-`. Letters outside ASCII are kept.
pub fn make_alias(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    ALIAS_SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Validation run before a menu item is stored
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuItemContract;

impl MenuItemContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_title(&self, title: &str, errors: &mut ValidationErrors) {
        if title.trim().is_empty() {
            errors.add("title", "can't be blank");
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.add("title", "is too long (maximum is 255 characters)");
        }
    }

    pub fn validate_alias(&self, alias: &str, errors: &mut ValidationErrors) {
        if alias.is_empty() {
            errors.add("alias", "can't be blank");
        } else if RESERVED_ALIASES.contains(&alias) {
            errors.add("alias", "is reserved and cannot be used");
        }
    }

    /// A publish-down date earlier than the publish-up date blocks the save
    pub fn validate_publish_window(&self, item: &MenuItem, errors: &mut ValidationErrors) {
        if let (Some(up), Some(down)) = (item.publish_up, item.publish_down) {
            if down < up {
                errors.add("publish_down", "must not be earlier than publish_up");
            }
        }
    }
}

impl Contract<MenuItem> for MenuItemContract {
    fn validate(&self, entity: &MenuItem) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_title(&entity.title, &mut errors);
        self.validate_alias(&entity.alias, &mut errors);
        self.validate_publish_window(entity, &mut errors);

        errors.into_result()
    }
}

impl Check<MenuItem> for MenuItemContract {
    fn normalize(&self, mut entity: MenuItem) -> MenuItem {
        entity.alias = if entity.alias.trim().is_empty() {
            make_alias(&entity.title)
        } else {
            make_alias(&entity.alias)
        };
        entity
    }

    /// The home item is always published without a window
    fn finish(&self, mut entity: MenuItem) -> MenuItem {
        if entity.home {
            entity.publish_up = None;
            entity.publish_down = None;
        }
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn item(title: &str) -> MenuItem {
        MenuItem {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_make_alias() {
        assert_eq!(make_alias("  Latest News! "), "latest-news");
        assert_eq!(make_alias("a__b--c"), "a-b-c");
        assert_eq!(make_alias("***"), "");
        assert_eq!(make_alias("Über uns"), "über-uns");
    }

    #[test]
    fn test_title_without_letters_needs_an_alias() {
        let errors = MenuItemContract::new().check(item("***")).unwrap_err();
        assert_eq!(errors.get("alias").unwrap(), &vec!["can't be blank".to_string()]);

        let mut menu_item = item("***");
        menu_item.alias = "stars".into();
        assert_eq!(MenuItemContract::new().check(menu_item).unwrap().alias, "stars");
    }

    #[test]
    fn test_title_length_counts_characters() {
        let title = "é".repeat(200);
        assert!(title.len() > 255);
        assert!(MenuItemContract::new().check(item(&title)).is_ok());

        let errors = MenuItemContract::new().check(item(&"é".repeat(256))).unwrap_err();
        assert!(errors.has_error("title"));
    }

    #[test]
    fn test_check_derives_alias() {
        let checked = MenuItemContract::new().check(item("About Us")).unwrap();
        assert_eq!(checked.alias, "about-us");
    }

    #[test]
    fn test_blank_title_fails() {
        let errors = MenuItemContract::new().check(item("   ")).unwrap_err();
        assert!(errors.has_error("title"));
    }

    #[test]
    fn test_reserved_alias_fails() {
        let mut menu_item = item("Root");
        menu_item.alias = "ROOT".into();

        let errors = MenuItemContract::new().check(menu_item).unwrap_err();
        assert!(errors.has_error("alias"));
    }

    #[test]
    fn test_publish_down_before_up_blocks_write() {
        let up = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut menu_item = item("Events");
        menu_item.publish_up = Some(up);
        menu_item.publish_down = Some(up - Duration::days(1));

        let errors = MenuItemContract::new().check(menu_item).unwrap_err();
        assert_eq!(
            errors.get("publish_down").unwrap(),
            &vec!["must not be earlier than publish_up".to_string()]
        );
    }

    #[test]
    fn test_open_ended_window_is_valid() {
        let mut menu_item = item("Events");
        menu_item.publish_down = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());

        let checked = MenuItemContract::new().check(menu_item).unwrap();
        assert!(checked.publish_up.is_none());
        assert!(checked.publish_down.is_some());
    }

    #[test]
    fn test_home_item_clears_window() {
        let up = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut menu_item = item("Home");
        menu_item.home = true;
        menu_item.publish_up = Some(up);
        menu_item.publish_down = Some(up + Duration::days(30));

        let checked = MenuItemContract::new().check(menu_item).unwrap();
        assert!(checked.publish_up.is_none());
        assert!(checked.publish_down.is_none());
    }

    #[test]
    fn test_home_item_with_inverted_window_still_fails() {
        let up = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut menu_item = item("Home");
        menu_item.home = true;
        menu_item.publish_up = Some(up);
        menu_item.publish_down = Some(up - Duration::hours(1));

        assert!(MenuItemContract::new().check(menu_item).is_err());
    }
}
