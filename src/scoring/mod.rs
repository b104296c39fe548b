pub mod engine;
pub mod handlers;
pub mod model;

use axum::{routing::post, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health-score", post(handlers::compute_health_score))
}
