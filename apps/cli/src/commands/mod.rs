//! # Commands Module
//!
//! Everything a front end can ask of the application.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (shared helpers)
//! ├── book.rs        ◄─── Catalog listing and book CRUD
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── module.rs      ◄─── Course module listing
//! └── navigation.rs  ◄─── Path → view resolution
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fn add_book(ctx: &AppContext, form: BookForm) -> AppResult<Book>       │
//! │         │                                                               │
//! │         ├── Ok  ──► messages.success("...") ──► return value            │
//! │         │                                                               │
//! │         └── Err ──► messages.error(message) ──► AppError to the caller  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod book;
pub mod cart;
pub mod module;
pub mod navigation;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

/// Posts an error notification for a failed command and hands the result
/// back unchanged.
pub(crate) fn report<T>(ctx: &AppContext, result: AppResult<T>) -> AppResult<T> {
    if let Err(err) = &result {
        ctx.messages.error(err.message.clone());
    }
    result
}

/// Lifts any error convertible to [`AppError`].
pub(crate) fn lift<T, E: Into<AppError>>(result: Result<T, E>) -> AppResult<T> {
    result.map_err(Into::into)
}
