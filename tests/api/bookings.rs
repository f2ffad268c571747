use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

fn booking_body() -> Value {
    json!({
        "name": "Frank",
        "email": "frank@test.com",
        "phone": "555-123-4567",
        "sessionType": "Family portrait",
        "message": "Saturday mornings work best",
        "captchaToken": "client-token",
    })
}

#[tokio::test]
async fn booking_request_sends_admin_and_client_emails() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "submit").await;
    test_app.mock_mail_delivery(2).await;

    let response = test_app.post_booking_request(&booking_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        test_app.sent_email_recipients().await,
        vec![
            test_app.config.email_client.receiver_email.clone(),
            String::from("frank@test.com"),
        ]
    );
}

#[tokio::test]
async fn booking_request_without_message_is_accepted() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "submit").await;
    test_app.mock_mail_delivery(2).await;

    let mut body = booking_body();
    body.as_object_mut().unwrap().remove("message");

    let response = test_app.post_booking_request(&body).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn booking_request_with_low_score_returns_400_and_sends_nothing() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.2, "submit").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking_request(&booking_body()).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn booking_request_with_mismatched_action_returns_400() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "login").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking_request(&booking_body()).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn booking_request_returns_400_for_missing_or_invalid_fields() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.captcha_server)
        .await;

    let test_cases = vec![
        ("name", Value::Null, "missing name"),
        ("email", Value::Null, "missing email"),
        ("phone", Value::Null, "missing phone"),
        ("sessionType", Value::Null, "missing session type"),
        ("captchaToken", Value::Null, "missing captcha token"),
        ("phone", json!("call me"), "invalid phone"),
        ("email", json!("frank.test.com"), "invalid email"),
    ];

    for (field, value, description) in test_cases {
        let mut body = booking_body();
        body[field] = value;

        let response = test_app.post_booking_request(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload had {}",
            description
        );
    }
}

#[tokio::test]
async fn booking_request_returns_500_when_the_second_email_fails() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "submit").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&test_app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_booking_request(&booking_body()).await;

    assert_eq!(500, response.status().as_u16());
}
