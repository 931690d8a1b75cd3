use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{LostItem, NewUser, Product, User};

/// Errors from the persistence store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate value for unique field: {0}")]
    Conflict(&'static str),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Listing filter shared by the product and lost item collections
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring over the collection's searchable fields
    pub search: Option<String>,
}

impl ListQuery {
    pub fn search(term: Option<&str>) -> Self {
        Self {
            search: term
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> Result<Product, StoreError>;
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;
    /// Available products only, newest first
    async fn list_products(&self, query: &ListQuery) -> Result<Vec<Product>, StoreError>;
    async fn replace_product(&self, product: Product) -> Result<Product, StoreError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait LostItemStore: Send + Sync {
    async fn insert_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError>;
    async fn find_lost_item(&self, id: Uuid) -> Result<Option<LostItem>, StoreError>;
    /// Items not yet found, newest first
    async fn list_lost_items(&self, query: &ListQuery) -> Result<Vec<LostItem>, StoreError>;
    async fn replace_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError>;
    async fn delete_lost_item(&self, id: Uuid) -> Result<(), StoreError>;
}

/// The whole document store: three collections plus lifecycle hooks
#[async_trait]
pub trait Store: UserStore + ProductStore + LostItemStore {
    async fn ping(&self) -> Result<(), StoreError>;
    async fn close(&self);
}
