#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, clippy::clone_on_ref_ptr, unreachable_pub)]
use axum::http::StatusCode;
use serde_json::json;

mod common;

fn valid_payload() -> serde_json::Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "company": "",
        "startTime": common::epoch_millis_now() - 5000,
    })
}

#[tokio::test]
async fn valid_submission_is_delivered() {
    let app = common::TestApp::spawn().await;

    let resp =
        app.client.post(format!("{}/contact", app.api_url)).json(&valid_payload()).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Your message was sent. Thank you!");

    assert_eq!(app.mailer.sent_count(), 1);
    let (message, reply_to) = app.mailer.last_sent();
    assert_eq!(message.subject, "Website inquiry from Jane Doe");
    assert_eq!(reply_to.email, "jane@example.com");
    assert_eq!(reply_to.name, "Jane Doe");
}

#[tokio::test]
async fn filled_honeypot_is_rejected_as_spam() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload["company"] = json!("x");

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Spam detected");
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn instant_submission_is_rejected_as_spam() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload["startTime"] = json!(common::epoch_millis_now());

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Spam detected");
}

#[tokio::test]
async fn absent_start_time_is_not_penalized() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("startTime");

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_email_is_reported_in_errors() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload.as_object_mut().unwrap().remove("email");

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Valid email is required");
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload["email"] = json!("a@b");

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0], "Valid email is required");
}

#[tokio::test]
async fn spam_screening_runs_before_validation() {
    let app = common::TestApp::spawn().await;

    // Both spammy and invalid: the spam rejection must win.
    let payload = json!({ "firstName": "Jane", "company": "x" });

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Spam detected");
}

#[tokio::test]
async fn unparseable_body_is_a_malformed_request() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/contact", app.api_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/contact", app.api_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Method Not Allowed");
}

#[tokio::test]
async fn form_encoded_submission_is_accepted() {
    let app = common::TestApp::spawn().await;

    let start = common::epoch_millis_now() - 5000;
    let body = format!(
        "firstName=Jane&lastName=Doe&email=jane%40example.com&message=Hello+there&startTime={start}"
    );

    let resp = app
        .client
        .post(format!("{}/contact", app.api_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let (message, _) = app.mailer.last_sent();
    assert!(message.text_body.contains("Message: Hello there"));
}

#[tokio::test]
async fn text_and_html_bodies_carry_the_submission() {
    let app = common::TestApp::spawn().await;

    let mut payload = valid_payload();
    payload["phone"] = json!("555-0100");
    payload["message"] = json!("First line\nSecond line");

    let resp = app.client.post(format!("{}/contact", app.api_url)).json(&payload).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (message, _) = app.mailer.last_sent();
    assert!(message.text_body.contains("Name: Jane Doe"));
    assert!(message.text_body.contains("Phone: 555-0100"));
    assert!(message.html_body.contains("First line<br>Second line"));
}
