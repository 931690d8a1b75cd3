// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth): signup, login and every read endpoint.
// Protected (bearer token): listing mutations and the current-user lookup.

pub mod protected;
pub mod public;
pub mod system;

use uuid::Uuid;

use crate::error::ApiError;
use crate::types::ResourceKind;

/// Path ids that are not valid UUIDs cannot name a record
pub(crate) fn parse_id(raw: &str, kind: ResourceKind) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(kind.not_found_message()))
}
