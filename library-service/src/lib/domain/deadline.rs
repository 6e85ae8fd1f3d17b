use std::future::Future;
use std::time::Duration;

use crate::domain::errors::StoreError;

/// Run `operation` under a fixed deadline.
///
/// On expiry the whole future tree is dropped, which cancels any joined child
/// operations still in flight, and the call fails with `StoreError::Timeout`.
pub async fn within<T, E, F>(budget: Duration, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<StoreError>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                budget_ms = budget.as_millis() as u64,
                "Operation exceeded request deadline"
            );
            Err(StoreError::Timeout(budget).into())
        }
    }
}
