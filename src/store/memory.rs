use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use super::{StoreError, SubscriptionStore};
use crate::domain::{email_address::EmailAddress, subscriber::Subscriber, waiver::Waiver};

/// Process-local store for development runs and tests.
///
/// Subscribers are keyed by email, so the map's entry lock gives the same
/// first-writer-wins behaviour as a unique index.
#[derive(Default)]
pub struct InMemoryStore {
    subscribers: DashMap<String, Subscriber>,
    waivers: DashMap<Uuid, Waiver>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn waivers(&self) -> Vec<Waiver> {
        self.waivers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryStore {
    async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        match self.subscribers.entry(subscriber.email.as_ref().to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                slot.insert(subscriber.clone());
                Ok(())
            }
        }
    }

    async fn find_subscriber(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Subscriber>, StoreError> {
        Ok(self
            .subscribers
            .get(email.as_ref())
            .map(|entry| entry.value().clone()))
    }

    async fn delete_subscriber(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        Ok(self.subscribers.remove(email.as_ref()).is_some())
    }

    async fn insert_waiver(&self, waiver: &Waiver) -> Result<(), StoreError> {
        match self.waivers.entry(waiver.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                slot.insert(waiver.clone());
                Ok(())
            }
        }
    }
}
