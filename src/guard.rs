//! Single-tier ownership checks for listings.
//!
//! Only the user who created a product or reported a lost item may change or
//! remove it. There are no roles and no overrides.

use uuid::Uuid;

use crate::database::models::{LostItem, Product};
use crate::error::ApiError;
use crate::types::{Operation, ResourceKind};

/// A record that belongs to exactly one user
pub trait Owned {
    const KIND: ResourceKind;

    /// Owner reference, or `None` when it cannot be resolved
    fn owner_id(&self) -> Option<Uuid>;
}

impl Owned for Product {
    const KIND: ResourceKind = ResourceKind::Product;

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.owner.user_id).filter(|id| !id.is_nil())
    }
}

impl Owned for LostItem {
    const KIND: ResourceKind = ResourceKind::LostItem;

    fn owner_id(&self) -> Option<Uuid> {
        Some(self.reported_by).filter(|id| !id.is_nil())
    }
}

/// Strict equality between the stored owner and the requester; unresolved owners deny
pub fn can_mutate<R: Owned>(resource: &R, requester: &Uuid) -> bool {
    match resource.owner_id() {
        Some(owner) => owner == *requester,
        None => false,
    }
}

pub fn ensure_owner<R: Owned>(resource: &R, requester: &Uuid, operation: Operation) -> Result<(), ApiError> {
    if can_mutate(resource, requester) {
        return Ok(());
    }

    tracing::warn!(
        "Denied {} of {} for user {}",
        operation.verb(),
        R::KIND.noun(),
        requester
    );
    Err(ApiError::forbidden(format!(
        "Not authorized to {} this {}",
        operation.verb(),
        R::KIND.noun()
    )))
}
