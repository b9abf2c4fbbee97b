//! # batoi-api: Remote Books Service Client
//!
//! The books service is the source of truth for the catalog. This crate
//! defines the [`BooksApi`] seam the stores depend on and its HTTP
//! implementation, [`HttpBooksApi`].
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_books     GET    {base}/books                                    │
//! │  create_book     POST   {base}/books          body: BookDraft           │
//! │  update_book     PATCH  {base}/books/{id}     body: {id, ...BookDraft}  │
//! │  delete_book     DELETE {base}/books/{id}                               │
//! │  fetch_modules   GET    {base}/modules                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use batoi_api::{BooksApi, HttpBooksApi};
//!
//! let api = HttpBooksApi::new("http://localhost:3000", Duration::from_secs(10))?;
//! let books = api.fetch_books().await?;
//! ```

pub mod client;
pub mod error;

pub use client::HttpBooksApi;
pub use error::{ClientError, ClientResult};

use async_trait::async_trait;
use batoi_core::{Book, BookDraft, BookId, Module};

/// Operations the application needs from the books service.
///
/// Implementations must not retry: one failed attempt surfaces at once.
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// Every book record, in service order.
    async fn fetch_books(&self) -> ClientResult<Vec<Book>>;

    /// Creates a record; the service assigns the id.
    async fn create_book(&self, draft: &BookDraft) -> ClientResult<Book>;

    /// Merges `draft` into the record `id`.
    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> ClientResult<Book>;

    async fn delete_book(&self, id: &BookId) -> ClientResult<()>;

    /// Every course module.
    async fn fetch_modules(&self) -> ClientResult<Vec<Module>>;
}
