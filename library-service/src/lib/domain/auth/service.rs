use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::SessionClaims;
use auth::SessionIssuer;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::service::register;
use crate::domain::account::uniqueness::UniquenessGate;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::models::SignupRequest;
use crate::domain::auth::ports::CredentialServicePort;
use crate::domain::deadline;
use crate::domain::errors::StoreError;
use crate::domain::hashing;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Signup, login and session verification.
pub struct CredentialService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    gate: UniquenessGate<AR>,
    password_hasher: PasswordHasher,
    session_issuer: Arc<SessionIssuer>,
    deadline: Duration,
    /// Verified against when the email is unknown, so both login failure
    /// paths pay for one hash verification.
    dummy_hash: String,
}

impl<AR> CredentialService<AR>
where
    AR: AccountRepository,
{
    /// # Errors
    /// * `PasswordError` - The dummy hash used for unknown accounts could not be computed
    pub fn new(
        repository: Arc<AR>,
        password_hasher: PasswordHasher,
        session_issuer: Arc<SessionIssuer>,
        deadline: Duration,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            gate: UniquenessGate::new(Arc::clone(&repository)),
            repository,
            password_hasher,
            session_issuer,
            deadline,
            dummy_hash,
        })
    }

    fn open_session(&self, account: Account) -> Result<AuthenticatedSession, AuthError> {
        let issued = self
            .session_issuer
            .issue(account.id, account.email.as_str())
            .map_err(AuthError::TokenIssue)?;

        Ok(AuthenticatedSession {
            account,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Look up and verify, folding every failure into `InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = match self.repository.get_by_email(email).await {
            Ok(account) => Some(account),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => {
                tracing::error!(error = %e, "Account lookup failed during login");
                None
            }
        };

        let stored_hash = match &account {
            Some(account) => account.password_hash.as_str(),
            None => self.dummy_hash.as_str(),
        };
        let verified = hashing::verify(&self.password_hasher, password, stored_hash)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Password verification failed");
                false
            });

        match account {
            Some(account) if verified => Ok(account),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Validate signup input in a fixed order: presence, confirmation, email,
/// phone, name length, password policy.
fn validate_signup(request: &SignupRequest) -> Result<CreateAccountCommand, AuthError> {
    let name = required("name", &request.name)?;
    let email = required("email", &request.email)?;
    if request.password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    if request.password != request.password_confirm {
        return Err(AuthError::PasswordMismatch);
    }

    let email = EmailAddress::new(email).map_err(AccountError::from)?;
    let phone = match request.phone.as_deref().map(str::trim) {
        Some(phone) if !phone.is_empty() => {
            Some(PhoneNumber::new(phone).map_err(AccountError::from)?)
        }
        _ => None,
    };
    let name = DisplayName::new(name).map_err(AccountError::from)?;
    let password = Password::new(&request.password).map_err(AccountError::from)?;

    Ok(CreateAccountCommand::new(name, email, password, phone))
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    match value.trim() {
        "" => Err(AuthError::MissingField(field)),
        value => Ok(value),
    }
}

#[async_trait]
impl<AR> CredentialServicePort for CredentialService<AR>
where
    AR: AccountRepository,
{
    async fn signup(&self, request: SignupRequest) -> Result<AuthenticatedSession, AuthError> {
        let result = async {
            let command = validate_signup(&request)?;
            let account = deadline::within(
                self.deadline,
                register(&*self.repository, &self.gate, &self.password_hasher, command),
            )
            .await?;
            self.open_session(account)
        }
        .await;

        match &result {
            Ok(session) => {
                tracing::info!(account_id = %session.account.id, "signup_success")
            }
            Err(e) => {
                tracing::warn!(email = request.email.trim(), error = %e, "signup_failed")
            }
        }
        result
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthenticatedSession, AuthError> {
        let email = required("email", &request.email)?;
        if request.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let result = async {
            let account =
                deadline::within(self.deadline, self.authenticate(email, &request.password))
                    .await?;
            self.open_session(account)
        }
        .await;

        match &result {
            Ok(session) => {
                tracing::info!(account_id = %session.account.id, "login_success")
            }
            Err(e) => tracing::warn!(email, error = %e, "login_failed"),
        }
        result
    }

    fn current_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.session_issuer
            .verify(token)
            .map_err(AuthError::InvalidToken)
    }
}
