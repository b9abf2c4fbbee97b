//! # Application Context
//!
//! The composition root: every store is built here once and borrowed by
//! the commands. Nothing in the application reaches for global state.

use std::sync::Arc;

use tracing::info;

use batoi_api::{BooksApi, HttpBooksApi};
use batoi_db::{Database, DbConfig};

use crate::error::AppResult;
use crate::state::{AppConfig, CartLedger, CatalogCache, ModulesCache, NotificationQueue};

pub struct AppContext {
    pub config: AppConfig,
    pub db: Database,
    pub cart: CartLedger,
    pub catalog: CatalogCache,
    pub modules: ModulesCache,
    pub messages: NotificationQueue,
}

impl AppContext {
    /// Opens local storage and the books service described by `config`.
    ///
    /// ## Startup Sequence
    /// 1. Resolve the database path (config, `BATOI_DB_PATH`, or data dir)
    /// 2. Connect to SQLite and run migrations
    /// 3. Build the HTTP client for the books service
    /// 4. Build the stores; the cart loads its snapshot
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        let api = HttpBooksApi::new(&config.api.base_url, config.api_timeout())?;

        Ok(Self::from_parts(config, db, Arc::new(api)).await)
    }

    /// Builds the stores over an already opened database and API.
    pub async fn from_parts(config: AppConfig, db: Database, api: Arc<dyn BooksApi>) -> Self {
        let cart = CartLedger::open(db.snapshot(config.storage.cart_key.clone())).await;
        let messages = NotificationQueue::new(config.message_lifetime());

        info!(cart_items = cart.count(), "Application state initialized");

        AppContext {
            cart,
            catalog: CatalogCache::new(api.clone()),
            modules: ModulesCache::new(api),
            messages,
            db,
            config,
        }
    }

    /// Closes the database pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, MockBooksApi};

    #[tokio::test]
    async fn test_cart_key_comes_from_config() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut config = AppConfig::default();
        config.storage.cart_key = "otherCart".to_string();

        let ctx =
            AppContext::from_parts(config, db.clone(), Arc::new(MockBooksApi::default())).await;
        ctx.cart.add(&book("1", 100)).await.unwrap();

        assert!(db
            .local_storage()
            .get_item("otherCart")
            .await
            .unwrap()
            .is_some());
        assert!(db
            .local_storage()
            .get_item("batoiBooksCart")
            .await
            .unwrap()
            .is_none());
    }
}
