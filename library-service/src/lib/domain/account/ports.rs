use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountPatch;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::UniqueField;
use crate::domain::errors::StoreError;
use crate::domain::query::FilterSpec;
use crate::domain::repository::CrudRepository;
use crate::domain::repository::Page;

/// Port for administrative account operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create an account without issuing a session.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, password and optional phone
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PhoneAlreadyExists` - Phone is already registered
    /// * `Password` - Hashing failed
    /// * `Store` - Database operation failed or timed out
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Store` - Database operation failed or timed out
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// List one page of accounts matching a compiled filter.
    ///
    /// # Errors
    /// * `Store` - Database operation failed or timed out
    async fn list_accounts(&self, spec: FilterSpec) -> Result<Page<Account>, AccountError>;

    /// Apply a partial update, enforcing uniqueness against other accounts.
    ///
    /// # Returns
    /// The account as stored after the update
    ///
    /// # Errors
    /// * `NoFieldsToUpdate` - Patch is empty
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - Another account uses the email
    /// * `PhoneAlreadyExists` - Another account uses the phone
    /// * `Store` - Database operation failed or timed out
    async fn update_account(
        &self,
        id: &AccountId,
        patch: AccountPatch,
    ) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Store` - Database operation failed or timed out
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait AccountRepository:
    CrudRepository<Entity = Account, Id = AccountId, Patch = AccountPatch>
{
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Database` - Transport or query failure
    async fn get_by_email(&self, email: &str) -> Result<Account, StoreError>;

    /// Whether any account other than `exclude` holds `value` in `field`.
    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude: Option<AccountId>,
    ) -> Result<bool, StoreError>;
}
