//! Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Owner-only mutations on a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Update,
    Delete,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Listing collections that carry an owner reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Product,
    LostItem,
}

impl ResourceKind {
    /// Lowercase noun used in client-facing messages
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Product => "product",
            ResourceKind::LostItem => "lost item",
        }
    }

    /// Capitalized label, e.g. "Lost item not found"
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Product => "Product",
            ResourceKind::LostItem => "Lost item",
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label())
    }
}
