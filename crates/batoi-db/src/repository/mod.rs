//! # Repository Module
//!
//! Storage repositories for Batoi Books.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartLedger                                                             │
//! │       │  load() / save(&entries)                                        │
//! │       ▼                                                                 │
//! │  SnapshotStore<CartEntry>       typed JSON array under one key          │
//! │       │  get_item(key) / set_item(key, json)                            │
//! │       ▼                                                                 │
//! │  LocalStorageRepository         raw string values by key                │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  local_storage table                                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`LocalStorageRepository`](local_storage::LocalStorageRepository) - string values by key
//! - [`SnapshotStore`](snapshot::SnapshotStore) - whole-list snapshots

pub mod local_storage;
pub mod snapshot;
