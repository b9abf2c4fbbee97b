//! # batoi-db: Local Storage Layer for Batoi Books
//!
//! Key-value storage on SQLite, the durable home of client-side state such
//! as the shopping cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Batoi Books Data Flow                            │
//! │                                                                         │
//! │  CartLedger.add(book)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     batoi-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │  SnapshotStore   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  LocalStorage    │   │ (embedded)  │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: local_storage(key, value)                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key-value repository and typed snapshots
//!
//! ## Usage
//!
//! ```rust,ignore
//! use batoi_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("batoi.db")).await?;
//! let cart = db.snapshot::<CartEntry>("batoiBooksCart");
//! let entries = cart.load().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::local_storage::LocalStorageRepository;
pub use repository::snapshot::SnapshotStore;
