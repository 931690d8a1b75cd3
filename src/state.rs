use std::sync::Arc;

use crate::auth::AuthError;
use crate::config::AppConfig;
use crate::database::{LostItemRepository, ProductRepository, Store, UserRepository};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub users: Arc<UserRepository>,
    pub products: Arc<ProductRepository>,
    pub lost_items: Arc<LostItemRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Result<Self, AuthError> {
        let config = Arc::new(config);
        Ok(Self {
            users: Arc::new(UserRepository::new(store.clone(), config.clone())?),
            products: Arc::new(ProductRepository::new(store.clone(), config.clone())),
            lost_items: Arc::new(LostItemRepository::new(store.clone(), config.clone())),
            config,
            store,
        })
    }
}
