//! Asset table columns
//!
//! The projection of the asset listing may be narrowed, but only to
//! columns from this set.

/// Selectable columns of the asset table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetColumn {
    Id,
    Name,
    Title,
    Level,
    Lft,
    Rgt,
}

impl AssetColumn {
    /// Default projection, in select order
    pub const DEFAULT: [AssetColumn; 6] = [
        AssetColumn::Id,
        AssetColumn::Name,
        AssetColumn::Title,
        AssetColumn::Level,
        AssetColumn::Lft,
        AssetColumn::Rgt,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim();
        let name = name.strip_prefix("a.").unwrap_or(name);
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "title" => Some(Self::Title),
            "level" => Some(Self::Level),
            "lft" => Some(Self::Lft),
            "rgt" => Some(Self::Rgt),
            _ => None,
        }
    }

    /// Unqualified column name, also the decoded field name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Title => "title",
            Self::Level => "level",
            Self::Lft => "lft",
            Self::Rgt => "rgt",
        }
    }

    /// Column qualified with the asset table alias
    pub fn qualified(&self) -> String {
        format!("a.{}", self.name())
    }
}

/// Ordered, duplicate-free projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<AssetColumn>,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self {
            columns: AssetColumn::DEFAULT.to_vec(),
        }
    }
}

impl ColumnSet {
    /// Build a projection; an empty list means the default projection
    pub fn new(columns: impl IntoIterator<Item = AssetColumn>) -> Self {
        let mut set: Vec<AssetColumn> = Vec::new();
        for column in columns {
            if !set.contains(&column) {
                set.push(column);
            }
        }
        if set.is_empty() {
            Self::default()
        } else {
            Self { columns: set }
        }
    }

    pub fn columns(&self) -> &[AssetColumn] {
        &self.columns
    }

    pub fn contains(&self, column: AssetColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// `a.id, a.name, ...`
    pub fn to_sql(&self) -> String {
        self.columns
            .iter()
            .map(AssetColumn::qualified)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
