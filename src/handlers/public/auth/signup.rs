// handlers/public/auth/signup.rs - POST /api/auth/signup handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::SessionData;
use crate::auth;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::SignupInput;

/// POST /api/auth/signup - register with an institutional email and receive a token
///
/// 201 with `{name, email, token}`, 400 on validation failure, 409 when the
/// email already has an account.
pub async fn signup_post(
    State(state): State<AppState>,
    payload: Result<Json<SignupInput>, JsonRejection>,
) -> ApiResult<SessionData> {
    let Json(input) = payload?;

    let user = state.users.create(&input).await?;
    let token = auth::generate_jwt(user.id, &state.config.security)?;

    Ok(ApiResponse::created(SessionData {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}
