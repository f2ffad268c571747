use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::{StoreError, SubscriptionStore};
use crate::domain::{email_address::EmailAddress, subscriber::Subscriber, waiver::Waiver};

// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresStore {
    db_pool: PgPool,
}

impl PostgresStore {
    pub fn new(db_pool: PgPool) -> Self {
        PostgresStore { db_pool }
    }

    #[tracing::instrument(name = "Running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await
    }
}

fn into_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::DuplicateKey
        }
        _ => {
            tracing::error!("Failed to execute query: {:?}", err);
            StoreError::Database(err)
        }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresStore {
    #[tracing::instrument(
        name = "Insert a new subscriber into the database",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (id, email, subscribed_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(subscriber.id)
        .bind(subscriber.email.as_ref())
        .bind(subscriber.subscribed_at)
        .execute(&self.db_pool)
        .await
        .map_err(into_store_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Look up a subscriber by email", skip(self))]
    async fn find_subscriber(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Subscriber>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, subscribed_at
            FROM subscribers
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.db_pool)
        .await
        .map_err(into_store_error)?;

        Ok(row.map(|row: PgRow| Subscriber {
            id: row.get("id"),
            email: email.clone(),
            subscribed_at: row.get("subscribed_at"),
        }))
    }

    #[tracing::instrument(name = "Delete a subscriber from the database", skip(self))]
    async fn delete_subscriber(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE email = $1")
            .bind(email.as_ref())
            .execute(&self.db_pool)
            .await
            .map_err(into_store_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(
        name = "Insert a signed waiver into the database",
        skip(self, waiver),
        fields(waiver_id = %waiver.id, class_title = %waiver.class_title)
    )]
    async fn insert_waiver(&self, waiver: &Waiver) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO waivers (id, name, email, phone, class_title, date, signature, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(waiver.id)
        .bind(waiver.name.as_ref())
        .bind(waiver.email.as_ref())
        .bind(waiver.phone.as_ref())
        .bind(&waiver.class_title)
        .bind(waiver.date)
        .bind(&waiver.signature)
        .bind(waiver.created_at)
        .execute(&self.db_pool)
        .await
        .map_err(into_store_error)?;

        Ok(())
    }
}
