//! Bearer-token extractor for reviewer and admin requests.
//!
//! Tokens are minted by the identity provider that fronts the labeling app;
//! this service holds the shared HS256 secret and only checks them. The
//! reviewer id in `sub` is what scopes the review queue and decisions.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use biolabel_core::error::CoreError;
use biolabel_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a validated identity-provider token.
///
/// Put it first in a handler's extractor list: a request without a usable
/// token is then rejected with 401 before its query string or body is read.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Reviewer id at the identity provider (`claims.sub`).
    pub user_id: DbId,
    /// Role claim, `"admin"` or `"reviewer"`.
    pub role: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| unauthorized("Missing identity token"))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| unauthorized("Authorization header must carry a Bearer token"))?;

        let claims = validate_token(token, &state.config.jwt).map_err(|err| {
            tracing::debug!(error = %err, "Rejected identity token");
            unauthorized("Identity token is invalid or expired")
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
