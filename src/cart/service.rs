//! Cart reconciliation: load-mutate-recompute-save per request.
//!
//! There is no in-process locking; two concurrent requests for the same
//! user's cart can lose an update to each other. The single-row upsert keeps
//! every saved state internally consistent, which is the guarantee we make.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::repo::CatalogLookup;

use super::model::Cart;
use super::store::CartStore;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

/// Current cart, or an empty unsaved aggregate when the user has none yet.
pub async fn get_cart(store: &dyn CartStore, user_id: Uuid) -> Result<Cart, CartError> {
    let cart = store.load_by_user(user_id).await?;
    Ok(cart.unwrap_or_else(|| Cart::new(user_id)))
}

pub async fn add_item(
    catalog: &dyn CatalogLookup,
    store: &dyn CartStore,
    user_id: Uuid,
    test_id: Uuid,
    quantity: i32,
) -> Result<Cart, CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity);
    }

    // Resolve the catalog entry before touching the cart: an unknown test
    // must leave the stored aggregate exactly as it was.
    let test = catalog
        .get_test(test_id)
        .await?
        .ok_or(CartError::NotFound("test"))?;

    let mut cart = store
        .load_by_user(user_id)
        .await?
        .unwrap_or_else(|| Cart::new(user_id));

    // Self-heal lines whose test was deleted from the catalog since they
    // were added. Dropped silently; the catalog is the source of truth.
    let mut alive: HashSet<Uuid> = HashSet::new();
    alive.insert(test.id);
    for line in &cart.lines {
        if alive.contains(&line.test_id) {
            continue;
        }
        if catalog.get_test(line.test_id).await?.is_some() {
            alive.insert(line.test_id);
        }
    }
    let pruned = cart.retain_lines(&alive);
    if pruned > 0 {
        debug!(%user_id, pruned, "dropped cart lines with dangling catalog refs");
    }

    cart.add_line(&test, quantity);
    cart.recompute_totals();
    store.save(&cart).await?;
    Ok(cart)
}

pub async fn remove_item(
    store: &dyn CartStore,
    user_id: Uuid,
    test_id: Uuid,
    quantity: Option<i32>,
) -> Result<Cart, CartError> {
    if matches!(quantity, Some(q) if q <= 0) {
        return Err(CartError::InvalidQuantity);
    }

    let mut cart = store
        .load_by_user(user_id)
        .await?
        .ok_or(CartError::NotFound("cart"))?;

    if !cart.remove_line(test_id, quantity) {
        return Err(CartError::NotFound("cart line"));
    }

    cart.recompute_totals();
    store.save(&cart).await?;
    Ok(cart)
}
