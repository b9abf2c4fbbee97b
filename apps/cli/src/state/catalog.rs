//! # Catalog Cache
//!
//! Local mirror of the book list held by the books service.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add / update / remove                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  wait for `mutation` gate (one mutation in flight at a time)            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  POST / PATCH / DELETE ──── error ──► record last_error, return Err     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  refresh(): GET /books ──── error ──► record last_error, return Err     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  swap the whole list for the server's                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache never patches itself locally: after every mutation it reloads
//! the authoritative list, so counts and totals always reflect the server.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use batoi_api::{BooksApi, ClientError, ClientResult};
use batoi_core::{module_image, Book, BookDraft, BookId, Money};

use super::loading::{LastError, LoadingFlag};

pub struct CatalogCache {
    api: Arc<dyn BooksApi>,
    books: RwLock<Vec<Book>>,
    loading: LoadingFlag,
    last_error: LastError,
    mutation: AsyncMutex<()>,
}

impl CatalogCache {
    /// Creates an empty cache. Call [`refresh`](Self::refresh) to fill it.
    pub fn new(api: Arc<dyn BooksApi>) -> Self {
        CatalogCache {
            api,
            books: RwLock::new(Vec::new()),
            loading: LoadingFlag::default(),
            last_error: LastError::default(),
            mutation: AsyncMutex::new(()),
        }
    }

    /// Replaces the cache with the server's current list.
    pub async fn refresh(&self) -> ClientResult<()> {
        let _loading = self.loading.acquire();
        self.last_error.clear();

        let books = self.api.fetch_books().await.map_err(|e| self.fail(e))?;

        debug!(count = books.len(), "Catalog refreshed");
        *self.books.write().unwrap_or_else(PoisonError::into_inner) = books;
        Ok(())
    }

    /// Creates a book, then reloads the catalog.
    ///
    /// A draft without a photo gets its module's cover image.
    pub async fn add(&self, mut draft: BookDraft) -> ClientResult<Book> {
        let _gate = self.mutation.lock().await;
        let _loading = self.loading.acquire();

        if draft.photo.is_none() {
            draft.photo = Some(module_image(&draft.module_code).to_string());
        }

        let created = self
            .api
            .create_book(&draft)
            .await
            .map_err(|e| self.fail(e))?;
        info!(book_id = %created.id, module = %created.module_code, "Book created");

        self.refresh().await?;
        Ok(created)
    }

    /// Updates book `id` with the draft fields, then reloads the catalog.
    pub async fn update(&self, id: &BookId, draft: BookDraft) -> ClientResult<Book> {
        let _gate = self.mutation.lock().await;
        let _loading = self.loading.acquire();

        let updated = self
            .api
            .update_book(id, &draft)
            .await
            .map_err(|e| self.fail(e))?;
        info!(book_id = %id, "Book updated");

        self.refresh().await?;
        Ok(updated)
    }

    /// Deletes book `id`, then reloads the catalog.
    pub async fn remove(&self, id: &BookId) -> ClientResult<()> {
        let _gate = self.mutation.lock().await;
        let _loading = self.loading.acquire();

        self.api.delete_book(id).await.map_err(|e| self.fail(e))?;
        info!(book_id = %id, "Book deleted");

        self.refresh().await
    }

    pub fn by_id(&self, id: &BookId) -> Option<Book> {
        self.read().iter().find(|b| &b.id == id).cloned()
    }

    pub fn books(&self) -> Vec<Book> {
        self.read().clone()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Sum of all prices with two decimals (`"25.00"`).
    pub fn total_price(&self) -> String {
        self.read().iter().map(|b| b.price).sum::<Money>().to_string()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    fn fail(&self, err: ClientError) -> ClientError {
        warn!(error = %err, "Books service call failed");
        self.last_error.set(err.to_string());
        err
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Book>> {
        self.books.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, draft, MockBooksApi};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn cache(api: &Arc<MockBooksApi>) -> CatalogCache {
        CatalogCache::new(api.clone())
    }

    fn network_down() -> ClientError {
        ClientError::Network("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_refresh_replaces_list() {
        let api = Arc::new(MockBooksApi::with_books(vec![book("1", 1999), book("2", 501)]));
        let catalog = cache(&api);

        assert_eq!(catalog.count(), 0);
        catalog.refresh().await.unwrap();

        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.total_price(), "25.00");
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn test_add_count_reflects_server_state() {
        let api = Arc::new(MockBooksApi::with_books(vec![book("1", 1000), book("2", 1000)]));
        let catalog = cache(&api);
        catalog.refresh().await.unwrap();

        // Another client adds a book meanwhile
        api.insert_remote(book("50", 700));
        catalog.add(draft("0374", 1200)).await.unwrap();

        assert_eq!(catalog.count(), 4);
        assert!(catalog.by_id(&BookId::from("50")).is_some());
    }

    #[tokio::test]
    async fn test_add_derives_photo_from_module() {
        let api = Arc::new(MockBooksApi::default());
        let catalog = cache(&api);

        catalog.add(draft("0021", 1000)).await.unwrap();
        catalog.add(draft("9999", 1000)).await.unwrap();
        let mut with_photo = draft("0021", 1000);
        with_photo.photo = Some("mine.jpg".to_string());
        catalog.add(with_photo).await.unwrap();

        let photos: Vec<Option<String>> = api
            .received
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.photo.clone())
            .collect();
        assert_eq!(
            photos,
            vec![
                Some("9788448635015.jpg".to_string()),
                Some("logoBatoi.png".to_string()),
                Some("mine.jpg".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_and_remove_resync() {
        let api = Arc::new(MockBooksApi::with_books(vec![book("1", 1000), book("2", 2000)]));
        let catalog = cache(&api);
        catalog.refresh().await.unwrap();

        let id = BookId::from("1");
        let mut changes = catalog.by_id(&id).unwrap().to_draft();
        changes.price = Money::from_cents(1550);
        catalog.update(&id, changes).await.unwrap();
        assert_eq!(catalog.by_id(&id).unwrap().price, Money::from_cents(1550));

        catalog.remove(&BookId::from("2")).await.unwrap();
        assert_eq!(catalog.count(), 1);
        assert_eq!(catalog.total_price(), "15.50");
    }

    #[tokio::test]
    async fn test_numeric_ids_match_string_ids() {
        let api = Arc::new(MockBooksApi::default());
        let catalog = cache(&api);

        let created = catalog.add(draft("0021", 1000)).await.unwrap();

        assert_eq!(created.id, BookId::from(1u64));
        assert!(catalog.by_id(&BookId::from("1")).is_some());
        assert!(catalog.by_id(&BookId::from("01")).is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_records_and_reraises() {
        let api = Arc::new(MockBooksApi::with_books(vec![book("1", 1000)]));
        let catalog = cache(&api);
        catalog.refresh().await.unwrap();

        api.fail(network_down());
        let err = catalog.refresh().await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(
            catalog.last_error().as_deref(),
            Some("Network error: connection refused")
        );
        assert!(!catalog.is_loading());
        // The previous snapshot stays
        assert_eq!(catalog.count(), 1);

        api.recover();
        catalog.refresh().await.unwrap();
        assert_eq!(catalog.last_error(), None);
    }

    #[tokio::test]
    async fn test_failed_mutation_skips_refresh() {
        let api = Arc::new(MockBooksApi::default());
        let catalog = cache(&api);

        let err = catalog.remove(&BookId::from("404")).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(catalog.last_error().is_some());
        assert_eq!(api.fetches.load(Ordering::SeqCst), 0);
        assert!(!catalog.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_in_flight() {
        let api = Arc::new(MockBooksApi::default().with_latency(Duration::from_millis(100)));
        let catalog = Arc::new(cache(&api));

        let task = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(catalog.is_loading());

        task.await.unwrap().unwrap();
        assert!(!catalog.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutations_are_single_flight() {
        let api = Arc::new(MockBooksApi::default().with_latency(Duration::from_millis(50)));
        let catalog = Arc::new(cache(&api));

        let mut tasks = Vec::new();
        for i in 0..4 {
            let catalog = catalog.clone();
            tasks.push(tokio::spawn(async move {
                catalog.add(draft("0021", 100 * (i + 1))).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(api.max_active.load(Ordering::SeqCst), 1);
        assert_eq!(catalog.count(), 4);
        assert_eq!(catalog.total_price(), "10.00");
    }
}
