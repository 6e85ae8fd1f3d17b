use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountPatch;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::models::UniqueField;
use crate::domain::account::ports::AccountRepository;
use crate::domain::errors::StoreError;
use crate::domain::query::FilterSpec;
use crate::domain::repository::CrudRepository;
use crate::domain::repository::Page;
use crate::outbound::repositories::sql;
use crate::outbound::repositories::store_error;

const SELECT_ACCOUNTS: &str =
    "SELECT id, name, email, password_hash, phone, created_at FROM accounts";

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |e: String| StoreError::Database(format!("Invalid stored account {id}: {e}"));

        Ok(Account {
            id: AccountId(row.id),
            name: DisplayName::new(&row.name).map_err(|e| invalid(e.to_string()))?,
            email: EmailAddress::new(&row.email).map_err(|e| invalid(e.to_string()))?,
            password_hash: row.password_hash,
            phone: row
                .phone
                .as_deref()
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|e| invalid(e.to_string()))?,
            created_at: row.created_at,
        })
    }
}

/// Column for a whitelisted account field. `password_hash` has none.
fn column(field: &str) -> Option<&'static str> {
    match field {
        "name" => Some("name"),
        "email" => Some("email"),
        "phone" => Some("phone"),
        "createdAt" => Some("created_at"),
        _ => None,
    }
}

fn constraint_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "accounts_email_key" => Some(UniqueField::Email.as_str()),
        "accounts_phone_key" => Some(UniqueField::Phone.as_str()),
        _ => None,
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for PostgresAccountRepository {
    type Entity = Account;
    type Id = AccountId;
    type Patch = AccountPatch;

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.phone.as_ref().map(|p| p.as_str()))
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, constraint_field))?;

        Ok(account)
    }

    async fn get_by_id(&self, id: &AccountId) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNTS} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        match row {
            Some(row) => Account::try_from(row),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNTS} ORDER BY name ASC, id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn list_with_query(&self, spec: &FilterSpec) -> Result<Page<Account>, StoreError> {
        let fetch = async {
            let mut query = QueryBuilder::<Postgres>::new(SELECT_ACCOUNTS);
            sql::push_where(&mut query, &spec.filter, column);
            sql::push_order_by(&mut query, &spec.sort, column);
            sql::push_page(&mut query, spec);
            query
                .build_query_as::<AccountRow>()
                .fetch_all(&self.pool)
                .await
        };
        let count = async {
            let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM accounts");
            sql::push_where(&mut query, &spec.filter, column);
            query.build_query_scalar::<i64>().fetch_one(&self.pool).await
        };

        let (rows, total) =
            tokio::try_join!(fetch, count).map_err(|e| store_error(e, constraint_field))?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(Account::try_from)
                .collect::<Result<_, _>>()?,
            total,
        })
    }

    async fn update_fields(&self, id: &AccountId, patch: AccountPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
                    .bind(id.0)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| store_error(e, constraint_field))?;
            return Ok(exists);
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE accounts SET ");
        {
            let mut assignments = query.separated(", ");
            if let Some(name) = patch.name {
                assignments
                    .push("name = ")
                    .push_bind_unseparated(name.as_str().to_string());
            }
            if let Some(email) = patch.email {
                assignments
                    .push("email = ")
                    .push_bind_unseparated(email.as_str().to_string());
            }
            if let Some(phone) = patch.phone {
                assignments
                    .push("phone = ")
                    .push_bind_unseparated(phone.as_str().to_string());
            }
        }
        query.push(" WHERE id = ").push_bind(id.0);

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: &AccountId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get_by_email(&self, email: &str) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNTS} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))?;

        match row {
            Some(row) => Account::try_from(row),
            None => Err(StoreError::NotFound(email.to_string())),
        }
    }

    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude: Option<AccountId>,
    ) -> Result<bool, StoreError> {
        let column = match field {
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
        };

        let mut query = QueryBuilder::<Postgres>::new("SELECT EXISTS(SELECT 1 FROM accounts WHERE ");
        query.push(column).push(" = ").push_bind(value.to_string());
        if let Some(exclude) = exclude {
            query.push(" AND id <> ").push_bind(exclude.0);
        }
        query.push(")");

        query
            .build_query_scalar::<bool>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(e, constraint_field))
    }
}
