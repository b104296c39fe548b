use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::{AuthStaff, AuthUser};
use crate::state::AppState;

use super::dto::{CreateTestRequest, Pagination};
use super::repo::LabTest;

#[instrument(skip(state, body))]
pub async fn create_test(
    State(state): State<AppState>,
    AuthStaff(_staff_id): AuthStaff,
    Json(body): Json<CreateTestRequest>,
) -> Result<(StatusCode, Json<LabTest>), (StatusCode, String)> {
    if body.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }
    if body.price <= 0.0 {
        return Err((StatusCode::BAD_REQUEST, "price must be positive".into()));
    }
    if body.parameter_count < 0 {
        return Err((StatusCode::BAD_REQUEST, "parameter_count must be >= 0".into()));
    }

    let test = LabTest::create(
        &state.db,
        body.name.trim(),
        body.code.as_deref(),
        body.price,
        body.parameter_count,
        body.special_instruction.as_deref(),
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(test)))
}

#[instrument(skip(state))]
pub async fn list_tests(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<LabTest>>, (StatusCode, String)> {
    let tests = LabTest::list(&state.db, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(tests))
}

#[instrument(skip(state))]
pub async fn get_test(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LabTest>, (StatusCode, String)> {
    let test = state.catalog.get_test(id).await.map_err(internal)?;
    match test {
        Some(test) => Ok(Json(test)),
        None => Err((StatusCode::NOT_FOUND, "Test not found".into())),
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!(error = %e, "catalog query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
