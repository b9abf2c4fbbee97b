//! # Book Commands
//!
//! Catalog listing and book CRUD. Mutations go through the catalog cache,
//! which reloads the list from the service afterwards.

use serde::Serialize;
use tracing::debug;

use batoi_core::{Book, BookForm, BookId, CoreError};

use super::{lift, report};
use crate::context::AppContext;
use crate::error::AppResult;

/// Catalog listing with its aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub books: Vec<Book>,
    pub count: usize,
    pub total_price: String,
}

/// Reloads and returns the catalog.
pub async fn list_books(ctx: &AppContext) -> AppResult<CatalogView> {
    debug!("list_books command");
    report(ctx, lift(ctx.catalog.refresh().await))?;

    Ok(CatalogView {
        books: ctx.catalog.books(),
        count: ctx.catalog.count(),
        total_price: ctx.catalog.total_price(),
    })
}

/// Reloads the catalog and returns book `id`.
pub async fn get_book(ctx: &AppContext, id: &BookId) -> AppResult<Book> {
    debug!(book_id = %id, "get_book command");
    report(ctx, find_book(ctx, id).await)
}

async fn find_book(ctx: &AppContext, id: &BookId) -> AppResult<Book> {
    lift(ctx.catalog.refresh().await)?;
    ctx.catalog
        .by_id(id)
        .ok_or_else(|| CoreError::BookNotFound(id.to_string()).into())
}

/// Validates the form and creates the book.
///
/// ## Returns
/// The record as created by the service (with its assigned id)
pub async fn add_book(ctx: &AppContext, form: BookForm) -> AppResult<Book> {
    debug!("add_book command");
    let book = report(ctx, create_book(ctx, &form).await)?;
    ctx.messages.success(format!("Book {} added", book.id));
    Ok(book)
}

/// Validates the form and updates book `id`.
pub async fn edit_book(ctx: &AppContext, id: &BookId, form: BookForm) -> AppResult<Book> {
    debug!(book_id = %id, "edit_book command");
    let book = report(ctx, update_book(ctx, id, &form).await)?;
    ctx.messages.success(format!("Book {} updated", book.id));
    Ok(book)
}

async fn create_book(ctx: &AppContext, form: &BookForm) -> AppResult<Book> {
    let draft = lift(form.validate())?;
    lift(ctx.catalog.add(draft).await)
}

async fn update_book(ctx: &AppContext, id: &BookId, form: &BookForm) -> AppResult<Book> {
    let draft = lift(form.validate())?;
    lift(ctx.catalog.update(id, draft).await)
}

pub async fn delete_book(ctx: &AppContext, id: &BookId) -> AppResult<()> {
    debug!(book_id = %id, "delete_book command");
    report(ctx, lift(ctx.catalog.remove(id).await))?;

    ctx.messages.success(format!("Book {} deleted", id));
    Ok(())
}
