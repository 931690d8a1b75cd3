// handlers/protected/auth/me.rs - GET /api/auth/me handler

use axum::Extension;

use crate::database::models::PublicUser;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/me - the account behind the bearer token
pub async fn me_get(Extension(auth): Extension<AuthUser>) -> ApiResult<PublicUser> {
    Ok(ApiResponse::success(PublicUser::from(&auth.user)))
}
