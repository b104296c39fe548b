pub mod dto;
pub mod handlers;
pub mod model;
pub mod service;
pub mod store;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(handlers::get_cart))
        .route("/cart/items", post(handlers::add_item))
        .route("/cart/items/:test_id", delete(handlers::remove_item))
}
