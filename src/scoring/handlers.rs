use axum::Json;
use tracing::{instrument, warn};

use crate::auth::AuthUser;

use super::engine;
use super::model::{BiometricSnapshot, HealthScoreResult, HealthStatus};

/// POST /health-score
///
/// Always answers 200 with a structured body; malformed input comes back as
/// status `Error` with score 0 so clients never have to parse a bare 4xx.
#[instrument(skip(body))]
pub async fn compute_health_score(
    AuthUser(user_id): AuthUser,
    Json(body): Json<BiometricSnapshot>,
) -> Json<HealthScoreResult> {
    let result = engine::compute_score(&body);
    if result.status == HealthStatus::Error {
        warn!(%user_id, error = ?result.error, "health score input rejected");
    }
    Json(result)
}
