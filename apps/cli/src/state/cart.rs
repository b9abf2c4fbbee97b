//! # Cart Ledger
//!
//! The shopping cart, mirrored to local storage after every change.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Operation            In-memory change           Snapshot write         │
//! │  ─────────            ────────────────           ──────────────         │
//! │                                                                         │
//! │  add(book) ─────────► push if id absent ───────► only if pushed         │
//! │                                                                         │
//! │  remove(id) ────────► drop every entry with id ► always                 │
//! │                                                                         │
//! │  clear() ───────────► items.clear() ───────────► always                 │
//! │                                                                         │
//! │  contains/count/total ► (read only)                                     │
//! │                                                                         │
//! │  NOTE: Writers queue on `persist`, so snapshots land in the same       │
//! │        order as the changes that produced them.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use batoi_core::{Book, BookId, CartEntry, Money};
use batoi_db::{DbResult, SnapshotStore};

/// Cart contents.
///
/// ## Invariants
/// - At most one entry per book id
/// - Entries keep the order they were added in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartEntry>) -> Self {
        Cart { items }
    }

    /// Appends `entry` unless its id is already present.
    pub fn add(&mut self, entry: CartEntry) -> bool {
        if self.contains(entry.id()) {
            return false;
        }
        self.items.push(entry);
        true
    }

    /// Removes every entry with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &BookId) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.items.iter().any(|e| e.id() == id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Exact sum of entry prices.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartEntry::price).sum()
    }

    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }
}

/// Cart bound to its storage snapshot.
#[derive(Debug)]
pub struct CartLedger {
    cart: Mutex<Cart>,
    persist: AsyncMutex<()>,
    store: SnapshotStore<CartEntry>,
}

impl CartLedger {
    /// Opens the ledger with whatever the snapshot holds. An absent or
    /// unreadable snapshot opens an empty cart.
    pub async fn open(store: SnapshotStore<CartEntry>) -> Self {
        let items = store.load().await;
        info!(key = %store.key(), count = items.len(), "Cart opened");

        CartLedger {
            cart: Mutex::new(Cart::from_items(items)),
            persist: AsyncMutex::new(()),
            store,
        }
    }

    /// Adds a copy of `book`. Returns `false` (and writes nothing) when the
    /// book is already in the cart.
    pub async fn add(&self, book: &Book) -> DbResult<bool> {
        let _gate = self.persist.lock().await;

        let snapshot = {
            let mut cart = self.lock();
            if !cart.add(CartEntry::from(book)) {
                debug!(book_id = %book.id, "Book already in cart");
                return Ok(false);
            }
            cart.items().to_vec()
        };

        self.store.save(&snapshot).await?;
        info!(book_id = %book.id, count = snapshot.len(), "Book added to cart");
        Ok(true)
    }

    /// Removes the book from the cart. Returns how many entries went away.
    pub async fn remove(&self, id: &BookId) -> DbResult<usize> {
        let _gate = self.persist.lock().await;

        let (removed, snapshot) = {
            let mut cart = self.lock();
            let removed = cart.remove(id);
            (removed, cart.items().to_vec())
        };

        self.store.save(&snapshot).await?;
        info!(book_id = %id, removed, "Book removed from cart");
        Ok(removed)
    }

    pub async fn clear(&self) -> DbResult<()> {
        let _gate = self.persist.lock().await;

        self.lock().clear();
        self.store.save(&[]).await?;

        info!("Cart cleared");
        Ok(())
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.lock().contains(id)
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn total(&self) -> Money {
        self.lock().total()
    }

    /// Entries in the order they were added.
    pub fn items(&self) -> Vec<CartEntry> {
        self.lock().items().to_vec()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
