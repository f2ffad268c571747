use serde_json::{json, Value};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

fn contact_body() -> Value {
    json!({
        "recaptchaToken": "client-token",
        "name": "Frank",
        "email": "frank@test.com",
        "message": "Do you run private classes?",
    })
}

async fn expect_no_external_calls(test_app: &TestApp) {
    for server in [&test_app.captcha_server, &test_app.email_server] {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn contact_returns_200_and_notifies_the_admin() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "contact").await;
    test_app.mock_mail_delivery(1).await;

    let response = test_app.post_contact(&contact_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        test_app.sent_email_recipients().await,
        vec![test_app.config.email_client.receiver_email.clone()]
    );
}

#[tokio::test]
async fn contact_without_token_is_rejected_before_any_external_call() {
    let test_app = TestApp::spawn_app().await;

    expect_no_external_calls(&test_app).await;

    let mut body = contact_body();
    body.as_object_mut().unwrap().remove("recaptchaToken");

    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_400_when_fields_are_missing() {
    let test_app = TestApp::spawn_app().await;

    expect_no_external_calls(&test_app).await;

    for field in ["name", "email", "message"] {
        let mut body = contact_body();
        body.as_object_mut().unwrap().remove(field);

        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when {} was missing",
            field
        );
    }
}

#[tokio::test]
async fn contact_returns_400_when_the_name_spans_several_lines() {
    let test_app = TestApp::spawn_app().await;

    expect_no_external_calls(&test_app).await;

    let mut body = contact_body();
    body["name"] = json!("Frank\nBcc: everyone@test.com");

    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_400_when_score_is_low_whatever_the_success_flag() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.3, "contact").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&contact_body()).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_400_when_verification_fails() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(false, 0.9, "contact").await;

    let response = test_app.post_contact(&contact_body()).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_500_when_the_captcha_service_is_down() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&test_app.captcha_server)
        .await;

    let response = test_app.post_contact(&contact_body()).await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn contact_returns_500_when_the_mail_api_fails() {
    let test_app = TestApp::spawn_app().await;

    test_app.mock_captcha(true, 0.9, "contact").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&contact_body()).await;

    assert_eq!(500, response.status().as_u16());
}
