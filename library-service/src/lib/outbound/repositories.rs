pub mod account;
pub mod book;
pub mod sql;

pub use account::PostgresAccountRepository;
pub use book::PostgresBookRepository;

use crate::domain::errors::StoreError;

/// Map a driver error, translating unique violations through `field_for`.
///
/// `field_for` turns a constraint name into the domain field it guards.
pub(crate) fn store_error(err: sqlx::Error, field_for: fn(&str) -> Option<&'static str>) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            let field = field_for(constraint).unwrap_or(constraint);
            return StoreError::Duplicate {
                field: field.to_string(),
            };
        }
    }
    StoreError::Database(err.to_string())
}
