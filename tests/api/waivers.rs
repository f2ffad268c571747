use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

fn waiver_body() -> Value {
    json!({
        "name": "Frank",
        "email": "frank@test.com",
        "phone": "555-123-4567",
        "classTitle": "Wheel Throwing 101",
        "date": "2024-05-04",
        "signature": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==",
    })
}

#[tokio::test]
async fn waiver_signup_is_stored_and_confirmed() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_mail_delivery(1).await;

    let response = test_app.post_waiver(&waiver_body()).await;

    assert_eq!(200, response.status().as_u16());

    let waivers = test_app.store.waivers();
    assert_eq!(waivers.len(), 1);
    assert_eq!(waivers[0].email.as_ref(), "frank@test.com");
    assert_eq!(waivers[0].date.to_string(), "2024-05-04");
    assert_eq!(
        test_app.sent_email_recipients().await,
        vec!["frank@test.com"]
    );
}

#[tokio::test]
async fn waiver_signup_accepts_large_signatures() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_mail_delivery(1).await;

    let mut body = waiver_body();
    body["signature"] = json!(format!("data:image/png;base64,{}", "A".repeat(200_000)));

    let response = test_app.post_waiver(&body).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn waiver_signup_returns_400_for_invalid_fields() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let test_cases = vec![
        ("date", json!("May 4th"), "invalid date"),
        ("signature", json!(""), "empty signature"),
        ("classTitle", Value::Null, "missing class title"),
    ];

    for (field, value, description) in test_cases {
        let mut body = waiver_body();
        body[field] = value;

        let response = test_app.post_waiver(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload had {}",
            description
        );
    }

    assert!(test_app.store.waivers().is_empty());
}
