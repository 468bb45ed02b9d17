use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use crate::core::relationships::{apply_accept, apply_deny, apply_request};
use crate::models::{
    Availability, AvailabilityStatus, Message, Profile, ProfileMap, Relationships, UserAccount,
};
use super::store::{
    AvailabilityStore, MessageStore, ProfileStore, RelationshipStore, Store, StoreError, UserStore,
};

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<String, UserAccount>,
    profiles: ProfileMap,
    relationships: HashMap<String, Relationships>,
    availability: HashMap<String, Availability>,
    messages: Vec<Message>,
}

/// In-process storage backend
///
/// All collections sit behind one lock, so every mutation (including the
/// two-record friend accept) is applied under a single write guard.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, account: UserAccount) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let lowered = account.username.to_lowercase();
        if state.users.keys().any(|existing| existing.to_lowercase() == lowered) {
            return Err(StoreError::Conflict(format!(
                "username {} already exists",
                account.username
            )));
        }
        state.users.insert(account.username.clone(), account);
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.state.read().await.users.get(username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, StoreError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, username: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.state.read().await.profiles.get(username).cloned())
    }

    async fn get_all_profiles(&self) -> Result<ProfileMap, StoreError> {
        Ok(self.state.read().await.profiles.clone())
    }

    async fn upsert_profile(&self, username: &str, profile: Profile) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .profiles
            .insert(username.to_string(), profile.normalized());
        Ok(())
    }
}

#[async_trait]
impl RelationshipStore for MemoryStore {
    async fn get_relationships(&self, username: &str) -> Result<Relationships, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .relationships
            .get(username)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_request(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let target = state.relationships.entry(to.to_string()).or_default();
        apply_request(from, to, target)?;
        tracing::debug!("Queued friend request {} -> {}", from, to);
        Ok(())
    }

    async fn accept_request(&self, from: &str, to: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let mut requester = state.relationships.get(from).cloned().unwrap_or_default();
        let mut accepter = state.relationships.get(to).cloned().unwrap_or_default();

        apply_accept(from, to, &mut requester, &mut accepter)?;

        state.relationships.insert(from.to_string(), requester);
        state.relationships.insert(to.to_string(), accepter);
        tracing::debug!("Friendship confirmed: {} <-> {}", from, to);
        Ok(())
    }

    async fn deny_request(&self, from: &str, to: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        Ok(state
            .relationships
            .get_mut(to)
            .map(|accepter| apply_deny(from, accepter))
            .unwrap_or(false))
    }
}

#[async_trait]
impl AvailabilityStore for MemoryStore {
    async fn get_availability(&self, username: &str) -> Result<Availability, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .availability
            .get(username)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_availability(
        &self,
        username: &str,
        date: NaiveDate,
        status: AvailabilityStatus,
    ) -> Result<Availability, StoreError> {
        let mut state = self.state.write().await;
        let calendar = state.availability.entry(username.to_string()).or_default();
        calendar.insert(date, status);
        Ok(calendar.clone())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(&self, message: Message) -> Result<(), StoreError> {
        self.state.write().await.messages.push(message);
        Ok(())
    }

    async fn conversation(&self, username: &str, other: &str) -> Result<Vec<Message>, StoreError> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| {
                (m.sender == username && m.receiver == other)
                    || (m.sender == other && m.receiver == username)
            })
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    async fn mark_read(&self, receiver: &str, sender: &str) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let mut updated = 0;
        for message in state
            .messages
            .iter_mut()
            .filter(|m| m.receiver == receiver && m.sender == sender && !m.read)
        {
            message.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn messages_for(&self, username: &str) -> Result<Vec<Message>, StoreError> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.sender == username || m.receiver == username)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
