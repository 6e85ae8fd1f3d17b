//! In-memory repositories evaluating compiled list queries the way the
//! Postgres adapters do.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use library_service::domain::account::models::Account;
use library_service::domain::account::models::AccountId;
use library_service::domain::account::models::AccountPatch;
use library_service::domain::account::models::UniqueField;
use library_service::domain::account::ports::AccountRepository;
use library_service::domain::book::models::Book;
use library_service::domain::book::models::BookId;
use library_service::domain::book::models::BookPatch;
use library_service::domain::errors::StoreError;
use library_service::domain::query::Constraint;
use library_service::domain::query::Direction;
use library_service::domain::query::Filter;
use library_service::domain::query::FilterSpec;
use library_service::domain::query::FilterValue;
use library_service::domain::repository::CrudRepository;
use library_service::domain::repository::Page;
use uuid::Uuid;

/// A stored field value as the query evaluator sees it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Text(String),
    Int(i64),
}

/// Record kept in a [`MemoryTable`].
pub trait Record: Clone + Send + Sync + 'static {
    fn key(&self) -> Uuid;
    fn field(&self, name: &str) -> Option<Field>;
}

impl Record for Account {
    fn key(&self) -> Uuid {
        self.id.0
    }

    fn field(&self, name: &str) -> Option<Field> {
        match name {
            "name" => Some(Field::Text(self.name.as_str().to_string())),
            "email" => Some(Field::Text(self.email.as_str().to_string())),
            "phone" => self
                .phone
                .as_ref()
                .map(|phone| Field::Text(phone.as_str().to_string())),
            "createdAt" => Some(Field::Int(self.created_at.timestamp_micros())),
            _ => None,
        }
    }
}

impl Record for Book {
    fn key(&self) -> Uuid {
        self.id.0
    }

    fn field(&self, name: &str) -> Option<Field> {
        match name {
            "title" => Some(Field::Text(self.title.as_str().to_string())),
            "author" => Some(Field::Text(self.author.as_str().to_string())),
            "genre" => Some(Field::Text(self.genre.clone())),
            "yearPublished" => Some(Field::Int(i64::from(self.year_published.value()))),
            _ => None,
        }
    }
}

pub struct MemoryTable<R: Record> {
    rows: Mutex<BTreeMap<Uuid, R>>,
}

impl<R: Record> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<R: Record> MemoryTable<R> {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<Uuid, R>>, StoreError> {
        self.rows
            .lock()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn insert(&self, record: R) -> Result<R, StoreError> {
        self.lock()?.insert(record.key(), record.clone());
        Ok(record)
    }

    fn get(&self, key: Uuid) -> Result<R, StoreError> {
        self.lock()?
            .get(&key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn remove(&self, key: Uuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(&key).is_some())
    }

    fn query(&self, spec: &FilterSpec) -> Result<Page<R>, StoreError> {
        let mut matching: Vec<R> = self
            .lock()?
            .values()
            .filter(|record| matches(*record, &spec.filter))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            spec.sort
                .iter()
                .map(|key| {
                    let ordering = a.field(key.field).cmp(&b.field(key.field));
                    match key.direction {
                        Direction::Ascending => ordering,
                        Direction::Descending => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or_else(|| a.key().cmp(&b.key()))
        });

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(spec.skip as usize)
            .take(spec.limit as usize)
            .collect();

        Ok(Page { items, total })
    }
}

fn matches<R: Record>(record: &R, filter: &Filter) -> bool {
    let clauses_hold = filter.clauses.iter().all(|clause| {
        let value = record.field(clause.field);
        match (&clause.constraint, value) {
            (Constraint::Equals(FilterValue::Text(expected)), Some(Field::Text(actual))) => {
                actual == *expected
            }
            (Constraint::Equals(FilterValue::Int(expected)), Some(Field::Int(actual))) => {
                actual == *expected
            }
            (Constraint::Contains(text), Some(Field::Text(actual))) => contains(&actual, text),
            (Constraint::Contains(text), Some(Field::Int(actual))) => {
                contains(&actual.to_string(), text)
            }
            (Constraint::Range { min, max }, Some(Field::Int(actual))) => {
                min.map_or(true, |min| actual >= min) && max.map_or(true, |max| actual <= max)
            }
            _ => false,
        }
    });

    let search_holds = filter.search.as_ref().map_or(true, |search| {
        search.fields.iter().any(|field| match record.field(field) {
            Some(Field::Text(actual)) => contains(&actual, &search.text),
            _ => false,
        })
    });

    clauses_hold && search_holds
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Accounts with unique email and phone, like the `accounts` table.
#[derive(Default)]
pub struct MemoryAccountRepository {
    table: MemoryTable<Account>,
}

impl MemoryAccountRepository {
    fn conflict(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude: Option<AccountId>,
    ) -> Result<Option<UniqueField>, StoreError> {
        for account in self.table.all()? {
            if Some(account.id) == exclude {
                continue;
            }
            if email == Some(account.email.as_str()) {
                return Ok(Some(UniqueField::Email));
            }
            if phone.is_some() && phone == account.phone.as_ref().map(|p| p.as_str()) {
                return Ok(Some(UniqueField::Phone));
            }
        }
        Ok(None)
    }
}

fn duplicate(field: UniqueField) -> StoreError {
    StoreError::Duplicate {
        field: field.as_str().to_string(),
    }
}

#[async_trait]
impl CrudRepository for MemoryAccountRepository {
    type Entity = Account;
    type Id = AccountId;
    type Patch = AccountPatch;

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let phone = account.phone.as_ref().map(|p| p.as_str());
        if let Some(field) = self.conflict(Some(account.email.as_str()), phone, None)? {
            return Err(duplicate(field));
        }
        self.table.insert(account)
    }

    async fn get_by_id(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.table.get(id.0)
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        self.table.all()
    }

    async fn list_with_query(&self, spec: &FilterSpec) -> Result<Page<Account>, StoreError> {
        self.table.query(spec)
    }

    async fn update_fields(&self, id: &AccountId, patch: AccountPatch) -> Result<bool, StoreError> {
        let mut account = match self.table.get(id.0) {
            Ok(account) => account,
            Err(StoreError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        let email = patch.email.as_ref().map(|e| e.as_str());
        let phone = patch.phone.as_ref().map(|p| p.as_str());
        if let Some(field) = self.conflict(email, phone, Some(*id))? {
            return Err(duplicate(field));
        }

        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(email) = patch.email {
            account.email = email;
        }
        if let Some(phone) = patch.phone {
            account.phone = Some(phone);
        }
        self.table.insert(account)?;

        Ok(true)
    }

    async fn delete_by_id(&self, id: &AccountId) -> Result<bool, StoreError> {
        self.table.remove(id.0)
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn get_by_email(&self, email: &str) -> Result<Account, StoreError> {
        self.table
            .all()?
            .into_iter()
            .find(|account| account.email.as_str() == email)
            .ok_or_else(|| StoreError::NotFound(email.to_string()))
    }

    async fn exists_by_field(
        &self,
        field: UniqueField,
        value: &str,
        exclude: Option<AccountId>,
    ) -> Result<bool, StoreError> {
        let conflict = match field {
            UniqueField::Email => self.conflict(Some(value), None, exclude)?,
            UniqueField::Phone => self.conflict(None, Some(value), exclude)?,
        };
        Ok(conflict.is_some())
    }
}

#[derive(Default)]
pub struct MemoryBookRepository {
    table: MemoryTable<Book>,
}

#[async_trait]
impl CrudRepository for MemoryBookRepository {
    type Entity = Book;
    type Id = BookId;
    type Patch = BookPatch;

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        self.table.insert(book)
    }

    async fn get_by_id(&self, id: &BookId) -> Result<Book, StoreError> {
        self.table.get(id.0)
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        self.table.all()
    }

    async fn list_with_query(&self, spec: &FilterSpec) -> Result<Page<Book>, StoreError> {
        self.table.query(spec)
    }

    async fn update_fields(&self, id: &BookId, patch: BookPatch) -> Result<bool, StoreError> {
        let mut book = match self.table.get(id.0) {
            Ok(book) => book,
            Err(StoreError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(year) = patch.year_published {
            book.year_published = year;
        }
        if let Some(genre) = patch.genre {
            book.genre = genre;
        }
        self.table.insert(book)?;

        Ok(true)
    }

    async fn delete_by_id(&self, id: &BookId) -> Result<bool, StoreError> {
        self.table.remove(id.0)
    }
}
