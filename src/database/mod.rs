pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

pub use manager::{Backend, DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{LostItemRepository, ProductRepository, RepositoryError, UserRepository};
pub use store::{ListQuery, Store, StoreError};
