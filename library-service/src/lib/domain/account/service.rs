use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountPatch;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::UniqueField;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::uniqueness::Uniqueness;
use crate::domain::account::uniqueness::UniquenessGate;
use crate::domain::deadline;
use crate::domain::errors::StoreError;
use crate::domain::hashing;
use crate::domain::query::FilterSpec;
use crate::domain::repository::Page;

/// Administrative account management.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    gate: UniquenessGate<AR>,
    password_hasher: PasswordHasher,
    deadline: Duration,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// # Arguments
    /// * `repository` - Account store
    /// * `password_hasher` - Hasher for new account passwords
    /// * `deadline` - Budget for each operation, store round trips included
    pub fn new(repository: Arc<AR>, password_hasher: PasswordHasher, deadline: Duration) -> Self {
        Self {
            gate: UniquenessGate::new(Arc::clone(&repository)),
            repository,
            password_hasher,
            deadline,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        let account = deadline::within(
            self.deadline,
            register(&*self.repository, &self.gate, &self.password_hasher, command),
        )
        .await?;

        tracing::info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        deadline::within(self.deadline, async {
            self.repository.get_by_id(id).await.map_err(AccountError::from)
        })
        .await
    }

    async fn list_accounts(&self, spec: FilterSpec) -> Result<Page<Account>, AccountError> {
        deadline::within(self.deadline, async {
            self.repository
                .list_with_query(&spec)
                .await
                .map_err(AccountError::from)
        })
        .await
    }

    async fn update_account(
        &self,
        id: &AccountId,
        patch: AccountPatch,
    ) -> Result<Account, AccountError> {
        if patch.is_empty() {
            return Err(AccountError::NoFieldsToUpdate);
        }

        let account = deadline::within(self.deadline, async {
            let email = patch.email.as_ref().map(|e| e.as_str().to_string());
            let phone = patch.phone.as_ref().map(|p| p.as_str().to_string());

            let uniqueness = self
                .gate
                .check(email.as_deref(), phone.as_deref(), Some(*id))
                .await?;
            if let Uniqueness::Taken(field) = uniqueness {
                return Err(conflict(field, email.as_deref(), phone.as_deref()));
            }

            let matched = self
                .repository
                .update_fields(id, patch)
                .await
                .map_err(|e| write_error(e, email.as_deref(), phone.as_deref()))?;
            if !matched {
                return Err(AccountError::NotFound(id.to_string()));
            }

            Ok(self.repository.get_by_id(id).await?)
        })
        .await?;

        tracing::info!(account_id = %id, "Account updated");
        Ok(account)
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        let deleted = deadline::within(self.deadline, async {
            self.repository.delete_by_id(id).await.map_err(AccountError::from)
        })
        .await?;

        if !deleted {
            return Err(AccountError::NotFound(id.to_string()));
        }

        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }
}

/// Check uniqueness and hash the password concurrently, then persist.
///
/// Nothing is written when either branch fails.
pub(crate) async fn register<AR>(
    repository: &AR,
    gate: &UniquenessGate<AR>,
    password_hasher: &PasswordHasher,
    command: CreateAccountCommand,
) -> Result<Account, AccountError>
where
    AR: AccountRepository,
{
    let email = command.email.as_str();
    let phone = command.phone.as_ref().map(|p| p.as_str());

    let (uniqueness, password_hash) = tokio::join!(
        gate.check(Some(email), phone, None),
        hashing::hash(password_hasher, command.password.as_str()),
    );

    if let Uniqueness::Taken(field) = uniqueness? {
        return Err(conflict(field, Some(email), phone));
    }
    let password_hash = password_hash?;

    let account = Account {
        id: AccountId::new(),
        name: command.name.clone(),
        email: command.email.clone(),
        password_hash,
        phone: command.phone.clone(),
        created_at: Utc::now(),
    };

    repository
        .create(account)
        .await
        .map_err(|e| write_error(e, Some(email), phone))
}

fn conflict(field: UniqueField, email: Option<&str>, phone: Option<&str>) -> AccountError {
    match field {
        UniqueField::Email => AccountError::EmailAlreadyExists(email.unwrap_or_default().to_string()),
        UniqueField::Phone => AccountError::PhoneAlreadyExists(phone.unwrap_or_default().to_string()),
    }
}

/// Map a unique-index violation raised by the store to the matching conflict.
fn write_error(err: StoreError, email: Option<&str>, phone: Option<&str>) -> AccountError {
    match err {
        StoreError::Duplicate { field } if field == UniqueField::Email.as_str() => {
            conflict(UniqueField::Email, email, phone)
        }
        StoreError::Duplicate { field } if field == UniqueField::Phone.as_str() => {
            conflict(UniqueField::Phone, email, phone)
        }
        other => AccountError::from(other),
    }
}
