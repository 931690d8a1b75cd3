// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::SessionData;
use crate::auth;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::LoginInput;

/// POST /api/auth/login - exchange credentials for a token
///
/// Unknown email and wrong password both answer 401 "Invalid email or password".
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<SessionData> {
    let Json(input) = payload?;

    let user = state.users.authenticate(&input).await?;
    let token = auth::generate_jwt(user.id, &state.config.security)?;
    tracing::info!("User {} logged in", user.id);

    Ok(ApiResponse::success(SessionData {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}
