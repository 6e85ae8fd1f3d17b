/// Value type a filterable field compares as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

/// A single predicate on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Exact match.
    Equals(FilterValue),
    /// Case-insensitive substring match. The text is literal, never a pattern.
    Contains(String),
    /// Inclusive bounds. At least one side is set.
    Range { min: Option<i64>, max: Option<i64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: &'static str,
    pub constraint: Constraint,
}

impl Clause {
    pub fn new(field: &'static str, constraint: Constraint) -> Self {
        Self { field, constraint }
    }
}

/// Free-text search: matches when any listed field contains `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub text: String,
    pub fields: Vec<&'static str>,
}

/// Conjunction of clauses plus an optional OR-group search.
///
/// Field names are always borrowed from a whitelist, never from input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub clauses: Vec<Clause>,
    pub search: Option<Search>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.search.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub direction: Direction,
}

/// Compiled list query, ready for a repository adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub filter: Filter,
    /// Ordered sort keys, each field at most once.
    pub sort: Vec<SortKey>,
    /// 1-based page number, echoed back to clients.
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
}
