// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition plus every read endpoint. Listings are intentionally
// public; no user context is available here.

pub mod auth;
pub mod lost_items;
pub mod products;

use serde::Deserialize;

pub use lost_items::{lost_item_get, lost_items_get};
pub use products::{product_get, products_get};

/// `?search=` on collection reads
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}
