use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::{AuthStaff, AuthUser};
use crate::catalog::dto::Pagination;
use crate::scoring::engine::compute_score;
use crate::scoring::model::HealthScoreResult;
use crate::state::AppState;

use super::dto::UpsertBodyParameters;
use super::repo::{BodyParameters, NewBodyParameters};

fn scored<'a>(
    user_id: Uuid,
    body: &'a UpsertBodyParameters,
    result: &'a HealthScoreResult,
) -> Result<NewBodyParameters<'a>, (StatusCode, String)> {
    let components = serde_json::to_value(&result.components).map_err(internal)?;
    Ok(NewBodyParameters {
        user_id,
        dietitian_id: body.dietitian_id,
        height: body.height.as_deref(),
        weight: body.weight,
        bmi: body.bmi,
        body_fat: body.body_fat,
        trunk_fat: body.trunk_fat,
        subcutaneous_fat: body.subcutaneous_fat,
        muscle: body.muscle,
        visceral_fat: body.visceral_fat,
        sleep_hours: body.sleep_hours,
        sleep_quality: body.sleep_quality.as_deref(),
        stress_level: body.stress_level,
        body_age: body.body_age,
        hydration: body.hydration.as_deref(),
        score: result.score,
        status: result.status.as_str(),
        components,
    })
}

#[instrument(skip(state, body))]
pub async fn create_body_parameters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpsertBodyParameters>,
) -> Result<(StatusCode, Json<BodyParameters>), (StatusCode, String)> {
    let result = compute_score(&body.snapshot());
    let new = scored(user_id, &body, &result)?;
    let record = BodyParameters::insert(&state.db, new).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[instrument(skip(state))]
pub async fn list_body_parameters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<BodyParameters>>, (StatusCode, String)> {
    let rows = BodyParameters::list_by_user(&state.db, user_id, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

/// Dietitian view of a customer's snapshot history.
#[instrument(skip(state))]
pub async fn list_body_parameters_for_user(
    State(state): State<AppState>,
    AuthStaff(_staff_id): AuthStaff,
    Path(user_id): Path<Uuid>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<BodyParameters>>, (StatusCode, String)> {
    let rows = BodyParameters::list_by_user(&state.db, user_id, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, body))]
pub async fn update_body_parameters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpsertBodyParameters>,
) -> Result<Json<BodyParameters>, (StatusCode, String)> {
    let result = compute_score(&body.snapshot());
    let new = scored(user_id, &body, &result)?;
    match BodyParameters::update(&state.db, id, user_id, new)
        .await
        .map_err(internal)?
    {
        Some(record) => Ok(Json(record)),
        None => Err((StatusCode::NOT_FOUND, "Body parameters not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_body_parameters(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = BodyParameters::delete(&state.db, id, user_id)
        .await
        .map_err(internal)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Body parameters not found".into()))
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "body parameters query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
