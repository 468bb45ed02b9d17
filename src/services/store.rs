use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use crate::core::RelationshipError;
use crate::models::{
    Availability, AvailabilityStatus, Message, Profile, ProfileMap, Relationships, UserAccount,
};

/// Errors that can occur in any storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Relationship(#[from] RelationshipError),
}

/// Account storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Usernames are unique ignoring case.
    async fn create_user(&self, account: UserAccount) -> Result<(), StoreError>;

    /// Look up an account by its exact username
    async fn get_user(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// All accounts, ordered by username
    async fn list_users(&self) -> Result<Vec<UserAccount>, StoreError>;
}

/// Profile storage. Profiles come back normalized.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, StoreError>;

    async fn get_all_profiles(&self) -> Result<ProfileMap, StoreError>;

    async fn upsert_profile(&self, username: &str, profile: Profile) -> Result<(), StoreError>;
}

/// Friend requests and friendships
///
/// Implementations apply the transitions from `core::relationships` and
/// persist both affected records atomically.
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    async fn get_relationships(&self, username: &str) -> Result<Relationships, StoreError>;

    async fn send_request(&self, from: &str, to: &str) -> Result<(), StoreError>;

    async fn accept_request(&self, from: &str, to: &str) -> Result<(), StoreError>;

    /// Returns whether a pending request was removed
    async fn deny_request(&self, from: &str, to: &str) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn get_availability(&self, username: &str) -> Result<Availability, StoreError>;

    /// Set the status of one day and return the updated calendar
    async fn set_availability(
        &self,
        username: &str,
        date: NaiveDate,
        status: AvailabilityStatus,
    ) -> Result<Availability, StoreError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, message: Message) -> Result<(), StoreError>;

    /// Messages exchanged between two users, oldest first
    async fn conversation(&self, username: &str, other: &str) -> Result<Vec<Message>, StoreError>;

    /// Mark everything `sender` sent to `receiver` as read
    async fn mark_read(&self, receiver: &str, sender: &str) -> Result<u64, StoreError>;

    /// Every message sent or received by a user, oldest first
    async fn messages_for(&self, username: &str) -> Result<Vec<Message>, StoreError>;
}

/// Full storage backend used by the HTTP layer
#[async_trait]
pub trait Store:
    UserStore + ProfileStore + RelationshipStore + AvailabilityStore + MessageStore
{
    /// Health check for the backing storage
    async fn health_check(&self) -> Result<bool, StoreError>;
}
