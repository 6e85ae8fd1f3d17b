use std::sync::Arc;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::UniqueField;
use crate::domain::account::ports::AccountRepository;
use crate::domain::errors::StoreError;

/// Result of a uniqueness check that completed without store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    Available,
    Taken(UniqueField),
}

/// Concurrent email/phone existence checks ahead of account writes.
///
/// Best-effort: the store's unique indexes still back it up.
pub struct UniquenessGate<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
}

impl<AR> Clone for UniquenessGate<AR>
where
    AR: AccountRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<AR> UniquenessGate<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }

    /// Check the candidate email and phone, excluding the account being updated.
    ///
    /// Both probes run to completion before any outcome is reported. A store
    /// error wins over a conflict, and email wins over phone in both cases.
    /// Blank or absent candidates are skipped without a store round trip.
    ///
    /// # Errors
    /// * `Database` / `Timeout` - A probe failed
    pub async fn check(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude: Option<AccountId>,
    ) -> Result<Uniqueness, StoreError> {
        let (email_taken, phone_taken) = tokio::join!(
            self.probe(UniqueField::Email, email, exclude),
            self.probe(UniqueField::Phone, phone, exclude),
        );

        let email_taken = email_taken?;
        let phone_taken = phone_taken?;

        if email_taken {
            Ok(Uniqueness::Taken(UniqueField::Email))
        } else if phone_taken {
            Ok(Uniqueness::Taken(UniqueField::Phone))
        } else {
            Ok(Uniqueness::Available)
        }
    }

    async fn probe(
        &self,
        field: UniqueField,
        value: Option<&str>,
        exclude: Option<AccountId>,
    ) -> Result<bool, StoreError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.repository.exists_by_field(field, value, exclude).await,
            None => Ok(false),
        }
    }
}
