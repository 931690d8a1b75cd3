// handlers/public/auth/mod.rs - account creation and token acquisition

pub mod login;
pub mod signup;

use serde::Serialize;
use uuid::Uuid;

pub use login::login_post;
pub use signup::signup_post;

/// Session payload returned by signup and login
#[derive(Debug, Serialize)]
pub struct SessionData {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}
