//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                               │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart               │
//! │  │  Cart    │                │          │───┘ remove_from_cart          │
//! │  └──────────┘                └──────────┘                               │
//! │       ▲                           │                                     │
//! │       └───────── clear_cart ──────┘                                     │
//! │                                                                         │
//! │  Every state survives a restart: the ledger writes its snapshot to      │
//! │  local storage after each change.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use batoi_core::{BookId, CartEntry, CoreError};

use super::{lift, report};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::state::CartLedger;

/// Cart response including entries and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartEntry>,
    pub count: usize,
    /// Two decimals (`"25.00"`)
    pub total: String,
}

impl From<&CartLedger> for CartView {
    fn from(cart: &CartLedger) -> Self {
        CartView {
            items: cart.items(),
            count: cart.count(),
            total: cart.total().to_string(),
        }
    }
}

pub fn get_cart(ctx: &AppContext) -> CartView {
    debug!("get_cart command");
    CartView::from(&ctx.cart)
}

/// Puts catalog book `id` in the cart.
///
/// ## Behavior
/// - Looks the book up in a freshly reloaded catalog
/// - A book already in the cart stays there once; the user is told so
pub async fn add_to_cart(ctx: &AppContext, id: &BookId) -> AppResult<CartView> {
    debug!(book_id = %id, "add_to_cart command");
    let added = report(ctx, put_in_cart(ctx, id).await)?;

    if added {
        ctx.messages.success(format!("Book {} added to cart", id));
    } else {
        ctx.messages.error(format!("Book {} is already in the cart", id));
    }
    Ok(CartView::from(&ctx.cart))
}

async fn put_in_cart(ctx: &AppContext, id: &BookId) -> AppResult<bool> {
    lift(ctx.catalog.refresh().await)?;
    let book = ctx
        .catalog
        .by_id(id)
        .ok_or_else(|| AppError::from(CoreError::BookNotFound(id.to_string())))?;

    lift(ctx.cart.add(&book).await)
}

pub async fn remove_from_cart(ctx: &AppContext, id: &BookId) -> AppResult<CartView> {
    debug!(book_id = %id, "remove_from_cart command");
    let removed = report(ctx, lift(ctx.cart.remove(id).await))?;

    if removed == 0 {
        return report(ctx, Err(AppError::not_found("Cart item", id.as_str())));
    }
    ctx.messages.success(format!("Book {} removed from cart", id));
    Ok(CartView::from(&ctx.cart))
}

pub async fn clear_cart(ctx: &AppContext) -> AppResult<CartView> {
    debug!("clear_cart command");
    report(ctx, lift(ctx.cart.clear().await))?;

    ctx.messages.success("Cart emptied");
    Ok(CartView::from(&ctx.cart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{book, context};
    use batoi_core::NotificationKind;

    #[tokio::test]
    async fn test_add_to_cart_totals() {
        let (ctx, _api) = context(vec![book("1", 1999), book("2", 501)]).await;

        add_to_cart(&ctx, &BookId::from("1")).await.unwrap();
        let view = add_to_cart(&ctx, &BookId::from("2")).await.unwrap();

        assert_eq!(view.count, 2);
        assert_eq!(view.total, "25.00");
        assert_eq!(get_cart(&ctx).items.len(), 2);
    }

    #[tokio::test]
    async fn test_add_twice_keeps_one_entry() {
        let (ctx, _api) = context(vec![book("1", 1999)]).await;

        add_to_cart(&ctx, &BookId::from("1")).await.unwrap();
        let view = add_to_cart(&ctx, &BookId::from("1")).await.unwrap();

        assert_eq!(view.count, 1);
        let kinds: Vec<NotificationKind> =
            ctx.messages.messages().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Error]);
    }

    #[tokio::test]
    async fn test_add_unknown_book_fails() {
        let (ctx, _api) = context(vec![book("1", 1999)]).await;

        let err = add_to_cart(&ctx, &BookId::from("8")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(get_cart(&ctx).count, 0);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (ctx, _api) = context(vec![book("1", 1000), book("2", 2000)]).await;
        add_to_cart(&ctx, &BookId::from("1")).await.unwrap();
        add_to_cart(&ctx, &BookId::from("2")).await.unwrap();

        let view = remove_from_cart(&ctx, &BookId::from("1")).await.unwrap();
        assert_eq!(view.total, "20.00");

        let err = remove_from_cart(&ctx, &BookId::from("1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let view = clear_cart(&ctx).await.unwrap();
        assert_eq!(view.count, 0);
        assert_eq!(view.total, "0.00");
    }
}
