//! # State Module
//!
//! The application's stores. Each is an owned value built once by
//! [`AppContext`](crate::context::AppContext) and handed to commands by
//! reference.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌────────────────┐  │
//! │  │ CartLedger   │ │ CatalogCache │ │ ModulesCache │ │ Notification   │  │
//! │  │              │ │              │ │              │ │ Queue          │  │
//! │  │ Mutex<Cart>  │ │ RwLock<Vec<  │ │ RwLock<Vec<  │ │ Mutex<msgs +   │  │
//! │  │ + snapshot   │ │   Book>>     │ │   Module>>   │ │  JoinHandles>  │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • std locks are never held across an .await                           │
//! │  • CartLedger: writers queue on an async mutex around the snapshot     │
//! │  • CatalogCache: one mutation in flight (async mutex)                  │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod loading;
mod messages;
mod modules;

pub use cart::{Cart, CartLedger};
pub use catalog::CatalogCache;
pub use config::{ApiSettings, AppConfig, ConfigError, NotificationSettings, StorageSettings};
pub use loading::{LastError, LoadingFlag, LoadingGuard};
pub use messages::{MessageId, Notification, NotificationQueue};
pub use modules::ModulesCache;
