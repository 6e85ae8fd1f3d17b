//! Rendering of a [`FilterSpec`] into PostgreSQL clauses.
//!
//! Field names pass through a per-table column map before reaching SQL, and
//! every value is bound. Unmapped fields are skipped.

use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::domain::query::Constraint;
use crate::domain::query::Direction;
use crate::domain::query::Filter;
use crate::domain::query::FilterSpec;
use crate::domain::query::FilterValue;
use crate::domain::query::SortKey;

/// Maps a whitelisted field name to its column.
pub(crate) type ColumnMap = fn(&str) -> Option<&'static str>;

/// Append ` WHERE ...` when the filter has any renderable condition.
pub(crate) fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter, columns: ColumnMap) {
    let mut prefix = " WHERE ";

    for clause in &filter.clauses {
        let Some(column) = columns(clause.field) else {
            continue;
        };
        builder.push(prefix);
        prefix = " AND ";
        push_constraint(builder, column, &clause.constraint);
    }

    if let Some(search) = &filter.search {
        let search_columns: Vec<&'static str> =
            search.fields.iter().filter_map(|field| columns(field)).collect();
        if !search_columns.is_empty() {
            builder.push(prefix).push("(");
            for (i, column) in search_columns.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                push_contains(builder, column, &search.text);
            }
            builder.push(")");
        }
    }
}

/// Append ` ORDER BY ...`, always ending with `id ASC` for stable paging.
pub(crate) fn push_order_by(builder: &mut QueryBuilder<'_, Postgres>, sort: &[SortKey], columns: ColumnMap) {
    builder.push(" ORDER BY ");
    for key in sort {
        if let Some(column) = columns(key.field) {
            let direction = match key.direction {
                Direction::Ascending => "ASC",
                Direction::Descending => "DESC",
            };
            builder.push(format_args!("{column} {direction}, "));
        }
    }
    builder.push("id ASC");
}

pub(crate) fn push_page(builder: &mut QueryBuilder<'_, Postgres>, spec: &FilterSpec) {
    builder
        .push(" LIMIT ")
        .push_bind(spec.limit)
        .push(" OFFSET ")
        .push_bind(spec.skip);
}

fn push_constraint(builder: &mut QueryBuilder<'_, Postgres>, column: &str, constraint: &Constraint) {
    match constraint {
        Constraint::Equals(FilterValue::Text(value)) => {
            builder.push(column).push(" = ").push_bind(value.clone());
        }
        Constraint::Equals(FilterValue::Int(value)) => {
            builder.push(column).push(" = ").push_bind(*value);
        }
        Constraint::Contains(text) => push_contains(builder, column, text),
        Constraint::Range { min, max } => {
            builder.push("(");
            match (min, max) {
                (Some(min), Some(max)) => {
                    builder
                        .push(column)
                        .push(" >= ")
                        .push_bind(*min)
                        .push(" AND ")
                        .push(column)
                        .push(" <= ")
                        .push_bind(*max);
                }
                (Some(min), None) => {
                    builder.push(column).push(" >= ").push_bind(*min);
                }
                (None, Some(max)) => {
                    builder.push(column).push(" <= ").push_bind(*max);
                }
                (None, None) => {
                    builder.push("TRUE");
                }
            }
            builder.push(")");
        }
    }
}

fn push_contains(builder: &mut QueryBuilder<'_, Postgres>, column: &str, text: &str) {
    builder
        .push("CAST(")
        .push(column)
        .push(" AS TEXT) ILIKE ")
        .push_bind(format!("%{}%", escape_like(text)))
        .push(" ESCAPE '\\'");
}

/// Escape `LIKE` metacharacters so user text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
