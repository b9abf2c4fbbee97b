//! # batoi-core: Pure Domain Logic for Batoi Books
//!
//! Types and rules shared by every layer of the bookstore catalog. Nothing in
//! this crate touches the network, the disk or a clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Batoi Books Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    batoi CLI (apps/cli)                         │   │
//! │  │   CartLedger  CatalogCache  ModulesCache  NotificationQueue     │   │
//! │  └──────────────┬───────────────────────────────┬──────────────────┘   │
//! │                 │                               │                       │
//! │  ┌──────────────▼──────────────┐  ┌─────────────▼──────────────────┐   │
//! │  │  batoi-db (local storage)   │  │  batoi-api (remote service)    │   │
//! │  └──────────────┬──────────────┘  └─────────────┬──────────────────┘   │
//! │                 │                               │                       │
//! │  ┌──────────────▼───────────────────────────────▼──────────────────┐   │
//! │  │               ★ batoi-core (THIS CRATE) ★                       │   │
//! │  │   types · money · validation · catalog · routes · error         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, BookId, Module, CartEntry)
//! - [`money`] - Money type with integer arithmetic
//! - [`validation`] - Book form validation
//! - [`catalog`] - Module cover image lookup
//! - [`routes`] - Static path-to-view table
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use batoi_core::money::Money;
//!
//! let total = Money::from_cents(1999) + Money::from_cents(501);
//! assert_eq!(total.to_string(), "25.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod routes;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::module_image;
pub use error::{CoreError, FormErrors, ValidationError};
pub use money::Money;
pub use routes::Route;
pub use types::*;
pub use validation::BookForm;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "batoiBooksCart";

/// How long a notification stays on screen unless dismissed.
pub const MESSAGE_LIFETIME_MS: u64 = 5000;

/// Minimum publisher name length accepted by the book form.
pub const MIN_PUBLISHER_LEN: usize = 2;
