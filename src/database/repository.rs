//! Entity repositories: validation plus persistence for each collection.
//!
//! Every write re-runs the same rules a fresh submission goes through, so an
//! update can never store a record that `create` would have refused.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{self, AuthError};
use crate::config::AppConfig;
use crate::database::models::{LostItem, NewUser, OwnerSnapshot, Product, User};
use crate::database::store::{ListQuery, LostItemStore, ProductStore, Store, StoreError, UserStore};
use crate::types::ResourceKind;
use crate::validation::{
    self, lost_item, product, LostItemChanges, LostItemInput, LoginInput, ProductChanges,
    ProductInput, SignupInput, ValidationErrors,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{} not found", .0.label())]
    NotFound(ResourceKind),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct UserRepository {
    store: Arc<dyn Store>,
    config: Arc<AppConfig>,
    decoy_hash: String,
}

impl UserRepository {
    /// Hashes the login decoy up front with the configured cost
    pub fn new(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Result<Self, AuthError> {
        let decoy_hash = auth::decoy_hash(&config.security)?;
        Ok(Self {
            store,
            config,
            decoy_hash,
        })
    }

    /// Validate, hash and insert; a taken email leaves the store untouched
    pub async fn create(&self, input: &SignupInput) -> Result<User, RepositoryError> {
        let account = validation::user::validate_signup(input, &self.config.validation)?;

        let security = self.config.security.clone();
        let password = account.password;
        let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, &security))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let new_user = NewUser {
            name: account.name,
            email: account.email,
            password_hash,
        };
        match self.store.insert_user(new_user).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(StoreError::Conflict(_)) => Err(RepositoryError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Find by email then compare against the stored hash.
    /// An unknown email and a wrong password fail identically, and both pay
    /// for one Argon2 verification.
    pub async fn authenticate(&self, input: &LoginInput) -> Result<User, RepositoryError> {
        let credentials = validation::user::validate_login(input, &self.config.validation)?;

        let found = self.store.find_user_by_email(&credentials.email).await?;
        let stored = found
            .as_ref()
            .map_or_else(|| self.decoy_hash.clone(), |user| user.password_hash.clone());
        let password = credentials.password;
        let verified = tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))??;

        match found {
            Some(user) if verified => Ok(user),
            Some(user) => {
                tracing::debug!("Login attempt with wrong password for user {}", user.id);
                Err(RepositoryError::InvalidCredentials)
            }
            None => {
                tracing::debug!("Login attempt for unknown account");
                Err(RepositoryError::InvalidCredentials)
            }
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.find_user(id).await?)
    }
}

pub struct ProductRepository {
    store: Arc<dyn Store>,
    config: Arc<AppConfig>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// New listing owned by `owner`, with a snapshot of their details
    pub async fn create(&self, input: &ProductInput, owner: &User) -> Result<Product, RepositoryError> {
        let draft = product::validate_new_product(input, &self.config.validation)?;

        let record = Product {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            price: draft.price,
            condition: draft.condition,
            description: draft.description,
            image: draft.image,
            owner: OwnerSnapshot {
                user_id: owner.id,
                name: owner.name.clone(),
                email: owner.email.clone(),
                phone: draft.phone,
                year: draft.year,
                branch: draft.branch,
            },
            is_available: true,
            created_at: Utc::now(),
        };
        Ok(self.store.insert_product(record).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        self.store
            .find_product(id)
            .await?
            .ok_or(RepositoryError::NotFound(ResourceKind::Product))
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.store.list_products(query).await?)
    }

    /// Check only the fields an update body carries
    pub fn changes(&self, input: &ProductInput) -> Result<ProductChanges, RepositoryError> {
        Ok(product::validate_product_changes(input, &self.config.validation)?)
    }

    /// Merge onto the stored record, re-validate the whole, then persist
    pub async fn update(&self, mut existing: Product, changes: ProductChanges) -> Result<Product, RepositoryError> {
        changes.apply_to(&mut existing);
        product::check_product(&existing, &self.config.validation)?;
        match self.store.replace_product(existing).await {
            Err(StoreError::NotFound) => Err(RepositoryError::NotFound(ResourceKind::Product)),
            other => Ok(other?),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        match self.store.delete_product(id).await {
            Err(StoreError::NotFound) => Err(RepositoryError::NotFound(ResourceKind::Product)),
            other => Ok(other?),
        }
    }
}

pub struct LostItemRepository {
    store: Arc<dyn Store>,
    config: Arc<AppConfig>,
}

impl LostItemRepository {
    pub fn new(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub async fn create(&self, input: &LostItemInput, reporter: &User) -> Result<LostItem, RepositoryError> {
        let draft = lost_item::validate_new_lost_item(input, &self.config.validation)?;

        let record = LostItem {
            id: Uuid::new_v4(),
            item_name: draft.item_name,
            description: draft.description,
            location: draft.location,
            date_lost: draft.date_lost,
            contact_number: draft.contact_number,
            email: draft.email,
            image: draft.image,
            reported_by: reporter.id,
            is_found: false,
            created_at: Utc::now(),
        };
        Ok(self.store.insert_lost_item(record).await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<LostItem, RepositoryError> {
        self.store
            .find_lost_item(id)
            .await?
            .ok_or(RepositoryError::NotFound(ResourceKind::LostItem))
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<LostItem>, RepositoryError> {
        Ok(self.store.list_lost_items(query).await?)
    }

    pub fn changes(&self, input: &LostItemInput) -> Result<LostItemChanges, RepositoryError> {
        Ok(lost_item::validate_lost_item_changes(input, &self.config.validation)?)
    }

    pub async fn update(&self, mut existing: LostItem, changes: LostItemChanges) -> Result<LostItem, RepositoryError> {
        changes.apply_to(&mut existing);
        lost_item::check_lost_item(&existing, &self.config.validation)?;
        match self.store.replace_lost_item(existing).await {
            Err(StoreError::NotFound) => Err(RepositoryError::NotFound(ResourceKind::LostItem)),
            other => Ok(other?),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        match self.store.delete_lost_item(id).await {
            Err(StoreError::NotFound) => Err(RepositoryError::NotFound(ResourceKind::LostItem)),
            other => Ok(other?),
        }
    }
}
