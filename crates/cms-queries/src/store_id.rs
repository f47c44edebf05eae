//! List store keys
//!
//! A store key identifies one listing result for memoization. It is built
//! from a caller prefix and the normalized filter state in this order:
//!
//! `prefix, group_id, search, level_start, level_end, component, start,
//! limit, ordering, direction`
//!
//! Every segment is written as `<byte length>#<value>` and segments are
//! joined with `:`, so no value can bleed into its neighbour.

use std::fmt;

use crate::filters::FilterState;

/// Memoization key for a listing result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compact form: md5 hex of `context:key`
    pub fn digest(&self, context: &str) -> String {
        format!("{:x}", md5::compute(format!("{}:{}", context, self.0)))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute the store key for `state` under `prefix`
pub fn store_key(prefix: &str, state: &FilterState) -> CacheKey {
    let state = state.normalized();

    let segments = [
        prefix.to_string(),
        state.group_id.to_string(),
        state.search,
        state.level_start.to_string(),
        state.level_end.to_string(),
        state.component,
        state.start.to_string(),
        state.limit.to_string(),
        state.ordering,
        state.direction,
    ];

    let key = segments
        .iter()
        .map(|segment| format!("{}#{}", segment.len(), segment))
        .collect::<Vec<_>>()
        .join(":");

    CacheKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FilterState {
        FilterState::new()
            .search("news")
            .levels(1, 4)
            .component("com_content")
            .group(8)
            .order_by("a.title", "desc")
            .page(20, 10)
    }

    #[test]
    fn test_store_key_is_deterministic() {
        assert_eq!(store_key("list", &sample()), store_key("list", &sample()));
    }

    #[test]
    fn test_store_key_layout() {
        let key = store_key("list", &FilterState::new());
        assert_eq!(key.as_str(), "4#list:1#0:0#:1#0:1#0:0#:1#0:1#0:5#a.lft:3#asc");
    }

    #[test]
    fn test_every_field_changes_the_key() {
        let base = store_key("list", &sample());
        let variants = [
            sample().group(9),
            sample().search("newsy"),
            sample().levels(2, 4),
            sample().levels(1, 5),
            sample().component("com_menus"),
            sample().page(30, 10),
            sample().page(20, 50),
            sample().order_by("a.name", "desc"),
            sample().order_by("a.title", "asc"),
        ];

        for variant in &variants {
            assert_ne!(store_key("list", variant), base, "{:?}", variant);
        }
        assert_ne!(store_key("other", &sample()), base);
    }

    #[test]
    fn test_segments_cannot_shift() {
        let a = FilterState::new().search("a:1#b");
        let b = FilterState::new().search("a").component("b");
        assert_ne!(store_key("p", &a), store_key("p", &b));
    }

    #[test]
    fn test_store_key_uses_clamped_levels() {
        let clamped = FilterState::new().levels(3, 1);
        let explicit = FilterState::new().levels(3, 3);
        assert_eq!(store_key("p", &clamped), store_key("p", &explicit));
    }

    #[test]
    fn test_digest() {
        let key = store_key("list", &sample());
        let digest = key.digest("com_users.debuggroup");

        assert_eq!(digest.len(), 32);
        assert_eq!(digest, key.digest("com_users.debuggroup"));
        assert_ne!(digest, key.digest("com_users.debuguser"));
    }
}
