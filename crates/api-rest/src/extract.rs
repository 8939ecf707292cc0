//! Bearer-token authentication extractor.

use crate::error::ApiError;
use crate::state::AppState;
use api_shared::Claims;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use cardioscan_core::ShardableUuid;

/// The authenticated caller of a protected route.
///
/// Extracting this from a request verifies the `Authorization: Bearer`
/// token; any missing, malformed or expired token rejects with 401 before
/// the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: ShardableUuid,
    pub claims: Claims,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims = state.tokens.verify(token).map_err(|_| ApiError::Unauthorized)?;
        let user_id =
            ShardableUuid::parse(&claims.sub).map_err(|_| ApiError::Unauthorized)?;

        Ok(AuthUser { user_id, claims })
    }
}
