pub mod lost_item;
pub mod product;
pub mod user;

pub use lost_item::LostItem;
pub use product::{Condition, OwnerSnapshot, Product};
pub use user::{NewUser, PublicUser, User};
