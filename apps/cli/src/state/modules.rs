//! # Modules Cache
//!
//! Course modules as listed by the books service. Read-only: the same
//! loading and last-error contract as the catalog, without mutations.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use batoi_api::{BooksApi, ClientResult};
use batoi_core::Module;

use super::loading::{LastError, LoadingFlag};

pub struct ModulesCache {
    api: Arc<dyn BooksApi>,
    modules: RwLock<Vec<Module>>,
    loading: LoadingFlag,
    last_error: LastError,
}

impl ModulesCache {
    pub fn new(api: Arc<dyn BooksApi>) -> Self {
        ModulesCache {
            api,
            modules: RwLock::new(Vec::new()),
            loading: LoadingFlag::default(),
            last_error: LastError::default(),
        }
    }

    pub async fn refresh(&self) -> ClientResult<()> {
        let _loading = self.loading.acquire();
        self.last_error.clear();

        match self.api.fetch_modules().await {
            Ok(modules) => {
                debug!(count = modules.len(), "Modules refreshed");
                *self.modules.write().unwrap_or_else(PoisonError::into_inner) = modules;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load modules");
                self.last_error.set(e.to_string());
                Err(e)
            }
        }
    }

    pub fn modules(&self) -> Vec<Module> {
        self.read().clone()
    }

    pub fn by_code(&self, code: &str) -> Option<Module> {
        self.read().iter().find(|m| m.code == code).cloned()
    }

    /// Display name for `code`; the code itself when the module is unknown.
    pub fn literal(&self, code: &str) -> String {
        self.by_code(code)
            .map(|m| m.cliteral)
            .unwrap_or_else(|| code.to_string())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Module>> {
        self.modules.read().unwrap_or_else(PoisonError::into_inner)
    }
}
