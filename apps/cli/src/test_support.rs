//! Fixtures shared by the store and command tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Map;

use batoi_api::{BooksApi, ClientError, ClientResult};
use batoi_core::{Book, BookDraft, BookId, BookStatus, Module, Money};
use batoi_db::{Database, DbConfig};

use crate::context::AppContext;
use crate::state::AppConfig;

/// A book priced in cents.
pub fn book(id: &str, price_cents: i64) -> Book {
    Book {
        id: BookId::from(id),
        module_code: "0021".to_string(),
        publisher: "McGraw Hill".to_string(),
        price: Money::from_cents(price_cents),
        pages: 240,
        status: BookStatus::Good,
        photo: None,
        comments: None,
        extra: Map::new(),
    }
}

pub fn draft(module_code: &str, price_cents: i64) -> BookDraft {
    BookDraft {
        module_code: module_code.to_string(),
        publisher: "Editorial Donostiarra".to_string(),
        price: Money::from_cents(price_cents),
        pages: 180,
        status: BookStatus::New,
        photo: None,
        comments: None,
    }
}

pub fn module(code: &str, cliteral: &str) -> Module {
    Module {
        code: code.to_string(),
        cliteral: cliteral.to_string(),
        vliteral: None,
        extra: Map::new(),
    }
}

/// A context over in-memory storage and a mock service holding `books`.
pub async fn context(books: Vec<Book>) -> (AppContext, Arc<MockBooksApi>) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let api = Arc::new(MockBooksApi::with_books(books));
    let ctx = AppContext::from_parts(AppConfig::default(), db, api.clone()).await;
    (ctx, api)
}

/// In-memory books service.
///
/// Assigns sequential ids on create, fails every call while `fail_with` is
/// set, and can hold each mutation for `latency` to expose overlap.
#[derive(Default)]
pub struct MockBooksApi {
    pub books: Mutex<Vec<Book>>,
    pub modules: Mutex<Vec<Module>>,
    pub fail_with: Mutex<Option<ClientError>>,
    pub latency: Option<Duration>,
    pub received: Mutex<Vec<BookDraft>>,
    next_id: AtomicUsize,
    active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl MockBooksApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        let next = books.len();
        MockBooksApi {
            books: Mutex::new(books),
            next_id: AtomicUsize::new(next),
            ..Default::default()
        }
    }

    pub fn with_modules(mut self, modules: Vec<Module>) -> Self {
        self.modules = Mutex::new(modules);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn fail(&self, err: ClientError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    /// Inserts a record behind the cache's back.
    pub fn insert_remote(&self, book: Book) {
        self.books.lock().unwrap().push(book);
    }

    fn check(&self) -> ClientResult<()> {
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn mutation<T>(&self, f: impl FnOnce(&Self) -> ClientResult<T>) -> ClientResult<T> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let result = self.check().and_then(|_| f(self));
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn not_found(id: &BookId) -> ClientError {
    ClientError::Status {
        status: 404,
        body: format!("book {} not found", id),
    }
}

#[async_trait]
impl BooksApi for MockBooksApi {
    async fn fetch_books(&self) -> ClientResult<Vec<Book>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.check()?;
        Ok(self.books.lock().unwrap().clone())
    }

    async fn create_book(&self, draft: &BookDraft) -> ClientResult<Book> {
        self.mutation(|api| {
            api.received.lock().unwrap().push(draft.clone());
            let id = api.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let created = Book::from_draft(BookId::from(id as u64), draft.clone());
            api.books.lock().unwrap().push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> ClientResult<Book> {
        self.mutation(|api| {
            api.received.lock().unwrap().push(draft.clone());
            let mut books = api.books.lock().unwrap();
            let existing = books
                .iter_mut()
                .find(|b| &b.id == id)
                .ok_or_else(|| not_found(id))?;
            let extra = std::mem::take(&mut existing.extra);
            *existing = Book::from_draft(id.clone(), draft.clone());
            existing.extra = extra;
            Ok(existing.clone())
        })
        .await
    }

    async fn delete_book(&self, id: &BookId) -> ClientResult<()> {
        self.mutation(|api| {
            let mut books = api.books.lock().unwrap();
            let before = books.len();
            books.retain(|b| &b.id != id);
            if books.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await
    }

    async fn fetch_modules(&self) -> ClientResult<Vec<Module>> {
        self.check()?;
        Ok(self.modules.lock().unwrap().clone())
    }
}
