pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager, StoreKind};
pub use memory::MemoryCakeStore;
pub use postgres::PgCakeStore;
pub use store::{CakeStore, StoreError};
