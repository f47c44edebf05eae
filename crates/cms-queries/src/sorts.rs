//! List ordering
//!
//! Ordering columns and directions end up as raw text in the ORDER BY
//! clause, so both only come from the closed sets below.

use cms_core::error::CmsError;
use cms_core::result::CmsResult;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, tree order)
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl SortDirection {
    /// Parse from string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// SQL keyword
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns the asset listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingField {
    Title,
    Name,
    /// Tree order
    #[default]
    Lft,
    Id,
    Level,
}

impl OrderingField {
    pub const ALL: [OrderingField; 5] = [
        OrderingField::Title,
        OrderingField::Name,
        OrderingField::Lft,
        OrderingField::Id,
        OrderingField::Level,
    ];

    /// Parse a qualified column name (`a.lft`)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == s)
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "a.title",
            Self::Name => "a.name",
            Self::Lft => "a.lft",
            Self::Id => "a.id",
            Self::Level => "a.level",
        }
    }
}

/// A validated ORDER BY criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortCriterion {
    pub field: OrderingField,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(field: OrderingField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Validate raw request values against the allow-lists.
    ///
    /// Empty values fall back to tree order ascending; anything else
    /// unknown is rejected.
    pub fn from_request(ordering: &str, direction: &str) -> CmsResult<Self> {
        let field = match ordering.trim() {
            "" => OrderingField::default(),
            raw => OrderingField::parse(raw)
                .ok_or_else(|| CmsError::invalid_filter("ordering", raw))?,
        };
        let direction = match direction.trim() {
            "" => SortDirection::default(),
            raw => SortDirection::parse(raw)
                .ok_or_else(|| CmsError::invalid_filter("direction", raw))?,
        };
        Ok(Self { field, direction })
    }

    /// Render as `column DIRECTION`
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field.column(), self.direction.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("descending"), None);
    }

    #[test]
    fn test_ordering_field_allow_list() {
        assert_eq!(OrderingField::parse("a.lft"), Some(OrderingField::Lft));
        assert_eq!(OrderingField::parse("a.title"), Some(OrderingField::Title));
        assert_eq!(OrderingField::parse("lft"), None);
        assert_eq!(OrderingField::parse("a.rules"), None);
        assert_eq!(OrderingField::parse("a.lft; DROP TABLE assets"), None);
    }

    #[test]
    fn test_criterion_from_request() {
        let criterion = SortCriterion::from_request("a.name", "desc").unwrap();
        assert_eq!(criterion.to_sql(), "a.name DESC");

        let default = SortCriterion::from_request("", "").unwrap();
        assert_eq!(default.to_sql(), "a.lft ASC");
    }

    #[test]
    fn test_criterion_rejects_unknown_values() {
        let err = SortCriterion::from_request("a.rules", "asc").unwrap_err();
        assert!(matches!(err, CmsError::InvalidFilter { field: "ordering", .. }));

        let err = SortCriterion::from_request("a.lft", "sideways").unwrap_err();
        assert!(matches!(err, CmsError::InvalidFilter { field: "direction", .. }));
    }
}
