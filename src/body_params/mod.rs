pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/body-parameters",
            get(handlers::list_body_parameters).post(handlers::create_body_parameters),
        )
        .route(
            "/body-parameters/:id",
            put(handlers::update_body_parameters).delete(handlers::delete_body_parameters),
        )
        .route(
            "/body-parameters/users/:user_id",
            get(handlers::list_body_parameters_for_user),
        )
}
