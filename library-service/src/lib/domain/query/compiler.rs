use crate::domain::query::filter::Clause;
use crate::domain::query::filter::Constraint;
use crate::domain::query::filter::Direction;
use crate::domain::query::filter::FieldKind;
use crate::domain::query::filter::Filter;
use crate::domain::query::filter::FilterSpec;
use crate::domain::query::filter::FilterValue;
use crate::domain::query::filter::Search;
use crate::domain::query::filter::SortKey;

const SEARCH_PARAM: &str = "q";
const SORT_PARAM: &str = "sort";
const PAGE_PARAM: &str = "page";
const LIMIT_PARAM: &str = "limit";

/// Per-endpoint whitelist and paging defaults.
#[derive(Debug, Clone, Copy)]
pub struct ListPolicy {
    /// Filterable fields, in the order their clauses are emitted.
    pub fields: &'static [(&'static str, FieldKind)],
    pub sortable: &'static [&'static str],
    /// Fallback sort token, `-` prefixed for descending.
    pub default_sort: &'static str,
    pub default_limit: i64,
    /// Upper bound for `limit`. Zero or less disables clamping.
    pub max_limit: i64,
}

/// Compile raw query parameters into a [`FilterSpec`].
///
/// Never fails. Unknown fields, unparsable numbers and bad paging values are
/// dropped or replaced by defaults. When a key repeats, its first occurrence
/// wins. Every field name in the result is borrowed from `policy`.
///
/// Per field, clauses are emitted as equality, then substring, then range.
pub fn compile(params: &[(String, String)], policy: &ListPolicy) -> FilterSpec {
    let mut clauses = Vec::new();

    for &(field, kind) in policy.fields {
        if let Some(raw) = param(params, field) {
            match kind {
                FieldKind::String => clauses.push(Clause::new(
                    field,
                    Constraint::Equals(FilterValue::Text(raw.to_string())),
                )),
                FieldKind::Int => {
                    if let Ok(value) = raw.parse::<i64>() {
                        clauses.push(Clause::new(
                            field,
                            Constraint::Equals(FilterValue::Int(value)),
                        ));
                    }
                }
            }
        }

        if let Some(raw) = param(params, &format!("{field}_like")) {
            clauses.push(Clause::new(field, Constraint::Contains(raw.to_string())));
        }

        if kind == FieldKind::Int {
            let min = int_param(params, &format!("{field}_min"));
            let max = int_param(params, &format!("{field}_max"));
            if min.is_some() || max.is_some() {
                clauses.push(Clause::new(field, Constraint::Range { min, max }));
            }
        }
    }

    let search = param(params, SEARCH_PARAM).and_then(|text| {
        let fields: Vec<&'static str> = policy
            .fields
            .iter()
            .filter(|(_, kind)| *kind == FieldKind::String)
            .map(|(field, _)| *field)
            .collect();

        (!fields.is_empty()).then(|| Search {
            text: text.to_string(),
            fields,
        })
    });

    let (page, limit) = paging(params, policy);

    FilterSpec {
        filter: Filter { clauses, search },
        sort: sort_keys(params, policy),
        page,
        limit,
        skip: (page - 1).saturating_mul(limit),
    }
}

/// First value for `key`, trimmed. Empty values count as absent.
fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

fn int_param(params: &[(String, String)], key: &str) -> Option<i64> {
    param(params, key).and_then(|raw| raw.parse().ok())
}

fn sort_keys(params: &[(String, String)], policy: &ListPolicy) -> Vec<SortKey> {
    let mut keys: Vec<SortKey> = Vec::new();

    if let Some(raw) = param(params, SORT_PARAM) {
        for token in raw.split(',') {
            if let Some(key) = sort_key(token, policy) {
                if !keys.iter().any(|k| k.field == key.field) {
                    keys.push(key);
                }
            }
        }
    }

    if keys.is_empty() {
        keys.extend(sort_key(policy.default_sort, policy));
    }

    keys
}

fn sort_key(token: &str, policy: &ListPolicy) -> Option<SortKey> {
    let token = token.trim();
    let (name, direction) = match token.strip_prefix('-') {
        Some(name) => (name, Direction::Descending),
        None => (token, Direction::Ascending),
    };

    policy
        .sortable
        .iter()
        .find(|field| **field == name)
        .map(|&field| SortKey { field, direction })
}

fn paging(params: &[(String, String)], policy: &ListPolicy) -> (i64, i64) {
    let page = int_param(params, PAGE_PARAM)
        .filter(|page| *page > 0)
        .unwrap_or(1);

    let mut limit = int_param(params, LIMIT_PARAM)
        .filter(|limit| *limit > 0)
        .unwrap_or(policy.default_limit);
    if policy.max_limit > 0 && limit > policy.max_limit {
        limit = policy.max_limit;
    }

    (page, limit)
}
