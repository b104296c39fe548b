use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use super::claims::{decode_claims, Claims};
use crate::state::AppState;

/// Extracts and validates the bearer JWT, returning the caller's user id.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

/// Same as [`AuthUser`] but additionally requires a staff role
/// (dietitian, admin or superadmin).
#[derive(Debug)]
pub struct AuthStaff(pub Uuid);

fn bearer_claims(parts: &Parts, state: &AppState) -> Result<Claims, (StatusCode, String)> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "missing Authorization header".to_string(),
        ))?;

    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".to_string()))?;

    decode_claims(token, &state.config.jwt)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid or expired token".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        Ok(AuthUser(claims.sub))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthStaff {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if !claims.role.is_staff() {
            return Err((StatusCode::FORBIDDEN, "staff role required".to_string()));
        }
        Ok(AuthStaff(claims.sub))
    }
}
