use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::state::AppState;

use super::dto::{AddItemRequest, RemoveItemQuery};
use super::model::Cart;
use super::service::{self, CartError};

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Cart>, (StatusCode, String)> {
    let cart = service::get_cart(state.carts.as_ref(), user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(cart))
}

#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<Cart>, (StatusCode, String)> {
    let cart = service::add_item(
        state.catalog.as_ref(),
        state.carts.as_ref(),
        user_id,
        body.test_id,
        body.quantity,
    )
    .await
    .map_err(error_response)?;
    Ok(Json(cart))
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(test_id): Path<Uuid>,
    Query(q): Query<RemoveItemQuery>,
) -> Result<Json<Cart>, (StatusCode, String)> {
    let cart = service::remove_item(state.carts.as_ref(), user_id, test_id, q.quantity)
        .await
        .map_err(error_response)?;
    Ok(Json(cart))
}

fn error_response(e: CartError) -> (StatusCode, String) {
    match &e {
        CartError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        CartError::InvalidQuantity => (StatusCode::BAD_REQUEST, e.to_string()),
        CartError::Persistence(source) => {
            error!(error = %source, "cart persistence failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "cart storage failure".into())
        }
    }
}
