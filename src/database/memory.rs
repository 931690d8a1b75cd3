use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{LostItem, NewUser, Product, User};
use super::store::{ListQuery, LostItemStore, ProductStore, Store, StoreError, UserStore};

/// In-process store used for local development and tests.
///
/// Each record keeps the sequence number it was inserted with so listings
/// stay in creation order even when two records share a timestamp.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_seq: u64,
    users: HashMap<Uuid, User>,
    products: HashMap<Uuid, (u64, Product)>,
    lost_items: HashMap<Uuid, (u64, LostItem)>,
}

impl MemoryState {
    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn search_hit(haystacks: &[&str], query: &ListQuery) -> bool {
    match &query.search {
        Some(term) => haystacks.iter().any(|h| h.to_lowercase().contains(term.as_str())),
        None => true,
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email"));
        }
        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        let seq = state.seq();
        state.products.insert(product.id, (seq, product.clone()));
        Ok(product)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.state.read().await.products.get(&id).map(|(_, p)| p.clone()))
    }

    async fn list_products(&self, query: &ListQuery) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<&(u64, Product)> = state
            .products
            .values()
            .filter(|(_, p)| p.is_available && search_hit(&[p.name.as_str(), p.category.as_str()], query))
            .collect();
        rows.sort_by_key(|(seq, p)| Reverse((p.created_at, *seq)));
        Ok(rows.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn replace_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        let slot = state.products.get_mut(&product.id).ok_or(StoreError::NotFound)?;
        slot.1 = product.clone();
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.products.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl LostItemStore for MemoryStore {
    async fn insert_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError> {
        let mut state = self.state.write().await;
        let seq = state.seq();
        state.lost_items.insert(item.id, (seq, item.clone()));
        Ok(item)
    }

    async fn find_lost_item(&self, id: Uuid) -> Result<Option<LostItem>, StoreError> {
        Ok(self.state.read().await.lost_items.get(&id).map(|(_, i)| i.clone()))
    }

    async fn list_lost_items(&self, query: &ListQuery) -> Result<Vec<LostItem>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<&(u64, LostItem)> = state
            .lost_items
            .values()
            .filter(|(_, i)| !i.is_found && search_hit(&[i.item_name.as_str(), i.location.as_str()], query))
            .collect();
        rows.sort_by_key(|(seq, i)| Reverse((i.created_at, *seq)));
        Ok(rows.into_iter().map(|(_, i)| i.clone()).collect())
    }

    async fn replace_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError> {
        let mut state = self.state.write().await;
        let slot = state.lost_items.get_mut(&item.id).ok_or(StoreError::NotFound)?;
        slot.1 = item.clone();
        Ok(item)
    }

    async fn delete_lost_item(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.lost_items.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
