//! # Navigation
//!
//! Resolves an application path to the data its view shows.
//!
//! ```text
//! /                    ──► Home       catalog listing
//! /view-book/:bookId   ──► ViewBook   one book
//! /edit-book/:bookId   ──► EditBook   form prefilled from the book
//! /add-book            ──► AddBook    empty form
//! /cart                ──► Cart       cart entries and total
//! /about               ──► About      static text
//! ```

use serde::Serialize;
use tracing::debug;

use batoi_core::{Book, BookForm, Route};

use super::book::{get_book, list_books, CatalogView};
use super::cart::{get_cart, CartView};
use super::report;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub const ABOUT_TEXT: &str =
    "Batoi Books: second-hand textbook exchange for the students of CIP Batoi.";

/// What a route renders.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "kebab-case")]
pub enum View {
    Home(CatalogView),
    ViewBook(Book),
    EditBook(BookForm),
    AddBook(BookForm),
    Cart(CartView),
    About(String),
}

impl View {
    /// Name of the route that produced this view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Home(_) => "home",
            View::ViewBook(_) => "view-book",
            View::EditBook(_) => "edit-book",
            View::AddBook(_) => "add-book",
            View::Cart(_) => "cart",
            View::About(_) => "about",
        }
    }
}

/// Resolves `path` and loads the view's data.
pub async fn open_path(ctx: &AppContext, path: &str) -> AppResult<View> {
    let route = report(ctx, Route::parse(path).map_err(AppError::from))?;
    debug!(route = route.name(), path = %route, "open_path command");

    let view = match route {
        Route::Home => View::Home(list_books(ctx).await?),
        Route::ViewBook(id) => View::ViewBook(get_book(ctx, &id).await?),
        Route::EditBook(id) => View::EditBook(BookForm::from_book(&get_book(ctx, &id).await?)),
        Route::AddBook => View::AddBook(BookForm::default()),
        Route::Cart => View::Cart(get_cart(ctx)),
        Route::About => View::About(ABOUT_TEXT.to_string()),
    };
    Ok(view)
}
