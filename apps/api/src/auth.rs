//! Header-based caller authentication for `/api/v1` routes.
//!
//! Trust boundary: `x-api-key` is a single shared secret held by the frontend
//! backend-for-frontend, and `x-user-id` is taken as-is from whoever holds it.
//! Per-user isolation is only as strong as that key holder's own login check.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";
const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. `owner` scopes every stored analysis.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub owner: String,
}

/// Valid API key with an optional caller. Anonymous analyses are not stored.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check_api_key(parts, state)?;

        let owner = header_value(parts, USER_ID_HEADER).ok_or_else(|| {
            warn!("Rejected request without {USER_ID_HEADER} header");
            AppError::Unauthorized
        })?;

        Ok(AuthUser {
            owner: owner.to_string(),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check_api_key(parts, state)?;

        Ok(MaybeUser(header_value(parts, USER_ID_HEADER).map(|owner| AuthUser {
            owner: owner.to_string(),
        })))
    }
}

fn check_api_key(parts: &Parts, state: &AppState) -> Result<(), AppError> {
    let provided = header_value(parts, API_KEY_HEADER).ok_or_else(|| {
        warn!("Rejected request without {API_KEY_HEADER} header");
        AppError::Unauthorized
    })?;

    let provided = provided.as_bytes();
    let expected = state.config.api_key.as_bytes();
    // Mismatched lengths are rejected before the constant-time comparison.
    if provided.len() != expected.len() || !bool::from(provided.ct_eq(expected)) {
        warn!("Rejected request with invalid API key");
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Trimmed, non-empty header value.
fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
