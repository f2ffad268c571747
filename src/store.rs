use async_trait::async_trait;

use crate::domain::{email_address::EmailAddress, subscriber::Subscriber, waiver::Waiver};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A record with the same key already exists.")]
    DuplicateKey,
    #[error("Failed to run the database query.")]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::error_chain_fmt(self, f)
    }
}

/// Persistence for everything the intake forms write.
///
/// Implementations must reject a second subscriber with the same email with
/// [`StoreError::DuplicateKey`], even when two inserts race each other, and must
/// treat deleting an unknown email as a success.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<(), StoreError>;

    async fn find_subscriber(&self, email: &EmailAddress)
        -> Result<Option<Subscriber>, StoreError>;

    /// Returns whether a record was actually removed.
    async fn delete_subscriber(&self, email: &EmailAddress) -> Result<bool, StoreError>;

    async fn insert_waiver(&self, waiver: &Waiver) -> Result<(), StoreError>;
}
