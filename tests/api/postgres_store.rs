use chrono::{NaiveDate, Utc};
use claim::{assert_none, assert_ok, assert_some};
use serde_json::json;
use uuid::Uuid;

use studio_intake::domain::{
    email_address::EmailAddress, person_name::PersonName, phone_number::PhoneNumber,
    subscriber::Subscriber, waiver::Waiver,
};
use studio_intake::store::{StoreError, SubscriptionStore};

use crate::helpers::{spawn_postgres_store, PostgresTestApp};

fn email(value: &str) -> EmailAddress {
    EmailAddress::parse(value.to_string()).unwrap()
}

#[tokio::test]
async fn second_insert_with_the_same_email_is_a_duplicate_key() {
    let store = spawn_postgres_store().await;

    assert_ok!(store.insert_subscriber(&Subscriber::new(email("a@b.com"))).await);
    let result = store.insert_subscriber(&Subscriber::new(email("a@b.com"))).await;

    assert!(matches!(result, Err(StoreError::DuplicateKey)));
}

#[tokio::test]
async fn racing_inserts_yield_exactly_one_duplicate_key() {
    let store = spawn_postgres_store().await;
    let first = Subscriber::new(email("race@b.com"));
    let second = Subscriber::new(email("race@b.com"));

    let (first, second) = tokio::join!(
        store.insert_subscriber(&first),
        store.insert_subscriber(&second)
    );

    let duplicates = [&first, &second]
        .iter()
        .filter(|result| matches!(result, Err(StoreError::DuplicateKey)))
        .count();

    assert_eq!(duplicates, 1);
    assert!(first.is_ok() || second.is_ok());
}

#[tokio::test]
async fn find_subscriber_returns_the_stored_record() {
    let store = spawn_postgres_store().await;
    let subscriber = Subscriber::new(email("a@b.com"));

    store.insert_subscriber(&subscriber).await.unwrap();

    let found = assert_some!(store.find_subscriber(&email("a@b.com")).await.unwrap());
    assert_eq!(found.id, subscriber.id);
    assert_eq!(found.email, subscriber.email);
}

#[tokio::test]
async fn find_subscriber_misses_unknown_emails() {
    let store = spawn_postgres_store().await;

    assert_none!(store.find_subscriber(&email("ghost@b.com")).await.unwrap());
}

#[tokio::test]
async fn delete_subscriber_reports_whether_a_row_was_removed() {
    let store = spawn_postgres_store().await;

    assert!(!store.delete_subscriber(&email("ghost@b.com")).await.unwrap());

    store
        .insert_subscriber(&Subscriber::new(email("a@b.com")))
        .await
        .unwrap();

    assert!(store.delete_subscriber(&email("a@b.com")).await.unwrap());
    assert_none!(store.find_subscriber(&email("a@b.com")).await.unwrap());
}

#[tokio::test]
async fn waivers_are_inserted() {
    let store = spawn_postgres_store().await;
    let waiver = Waiver {
        id: Uuid::new_v4(),
        name: PersonName::parse(String::from("Frank")).unwrap(),
        email: email("frank@test.com"),
        phone: PhoneNumber::parse(String::from("555-123-4567")).unwrap(),
        class_title: String::from("Wheel Throwing 101"),
        date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        signature: String::from("data:image/png;base64,AAAA"),
        created_at: Utc::now(),
    };

    assert_ok!(store.insert_waiver(&waiver).await);
}

#[tokio::test]
async fn subscribing_twice_against_postgres_returns_409() {
    let test_app = PostgresTestApp::spawn_app().await;

    // Welcome email for the first subscription only
    wiremock::Mock::given(wiremock::matchers::any())
        .respond_with(wiremock::ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let first = test_app.post_subscribe(&json!({ "email": "a@b.com" })).await;
    let second = test_app.post_subscribe(&json!({ "email": "A@B.com" })).await;

    assert_eq!(200, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
    assert_eq!(test_app.subscriber_count().await, 1);
}
