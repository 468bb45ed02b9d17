// Service exports
pub mod auth;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{secure_password, verify_password, PasswordStore};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{
    AvailabilityStore, MessageStore, ProfileStore, RelationshipStore, Store, StoreError, UserStore,
};
