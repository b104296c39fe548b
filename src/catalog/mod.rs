pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tests", post(handlers::create_test).get(handlers::list_tests))
        .route("/tests/:id", get(handlers::get_test))
}
