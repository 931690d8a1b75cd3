use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub user: User,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user,
        }
    }
}

/// JWT authentication middleware that validates tokens and loads the requesting user
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract JWT from Authorization header
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    // Validate signature and expiry, then resolve the subject to a user id
    let user_id = auth::verify_jwt(&token, &state.config.security).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::from(e)
    })?;

    // The token must still name an existing account
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} has no account", user_id);
            ApiError::unauthorized("Not authorized, user not found")
        })?;

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Not authorized, no token".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Not authorized, no token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_malformed_header_is_rejected() {
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
        assert!(extract_jwt_from_headers(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer   ")).is_err());
    }

    #[test]
    fn auth_user_wraps_the_loaded_account() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@nitj.ac.in".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: chrono::Utc::now(),
        };
        let auth = AuthUser::from(user.clone());
        assert_eq!(auth.id, user.id);
        assert_eq!(auth.user.email, "asha@nitj.ac.in");
    }
}
