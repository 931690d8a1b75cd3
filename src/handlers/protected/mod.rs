// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, which resolves the
// bearer token to an `AuthUser` request extension. Update and delete
// additionally pass the ownership guard before touching the store.

pub mod auth;
pub mod lost_items;
pub mod products;

pub use lost_items::{lost_item_delete, lost_item_post, lost_item_put};
pub use products::{product_delete, product_post, product_put};
