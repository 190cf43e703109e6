//! Integration tests for the HTTP email sender using mockito for HTTP mocking.

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use portfolio_contact::domain::EmailAddress;
use portfolio_contact::error::SendError;
use portfolio_contact::models::{ContactForm, MessageKind, OutgoingEmail, Submission};
use portfolio_contact::pipeline::SubmissionPipeline;
use portfolio_contact::sender::{HttpMessageSender, MessageSender};
use serde_json::json;
use std::sync::Arc;

fn email() -> OutgoingEmail {
    OutgoingEmail {
        to: EmailAddress::new("owner@example.com").unwrap(),
        from: EmailAddress::new("jane@x.com").unwrap(),
        subject: "Portfolio Contact: Hello".to_string(),
        html: "<p>Hi there</p>".to_string(),
        text: "Hi there".to_string(),
        timestamp: Utc::now(),
        kind: MessageKind::Contact,
    }
}

#[test]
fn test_deliver_posts_email_json() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/send")
        .match_header("authorization", "Bearer test-api-key")
        .match_body(Matcher::PartialJson(json!({
            "to": "owner@example.com",
            "from": "jane@x.com",
            "subject": "Portfolio Contact: Hello",
            "kind": "contact"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "sentAt": "2024-03-05T14:30:00Z"}"#)
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let outcome = sender.deliver(&email()).unwrap();

    mock.assert();
    assert!(outcome.success);
    assert_eq!(
        outcome.sent_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap())
    );
    assert_eq!(sender.metrics().http_requests_total(), 1);
}

#[test]
fn test_deliver_empty_body_counts_as_delivered() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/send")
        .with_status(202)
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let outcome = sender.deliver(&email()).unwrap();

    mock.assert();
    assert!(outcome.success);
    assert!(outcome.sent_at.is_some());
}

#[test]
fn test_deliver_declined_receipt() {
    let mut server = Server::new();

    server
        .mock("POST", "/send")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let outcome = sender.deliver(&email()).unwrap();

    assert!(!outcome.success);
    assert!(outcome.sent_at.is_none());
}

#[test]
fn test_deliver_unauthorized() {
    let mut server = Server::new();

    server
        .mock("POST", "/send")
        .with_status(401)
        .with_body("invalid key")
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "wrong".to_string());
    let result = sender.deliver(&email());

    assert!(matches!(result, Err(SendError::Unauthorized)));
    assert_eq!(sender.metrics().http_errors_total(), 1);
}

#[test]
fn test_deliver_forbidden_is_api_error() {
    let mut server = Server::new();

    server
        .mock("POST", "/send")
        .with_status(403)
        .with_body("sender domain not verified")
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());

    match sender.deliver(&email()) {
        Err(SendError::ApiError { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "sender domain not verified");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[test]
fn test_deliver_rate_limited() {
    let mut server = Server::new();

    server.mock("POST", "/send").with_status(429).create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let result = sender.deliver(&email());

    assert!(matches!(result, Err(SendError::RateLimitExceeded)));
}

#[test]
fn test_deliver_server_error() {
    let mut server = Server::new();

    server
        .mock("POST", "/send")
        .with_status(500)
        .with_body("mailer down")
        .create();

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());

    match sender.deliver(&email()) {
        Err(SendError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "mailer down");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_async_send_through_trait() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/send")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let sender: Arc<dyn MessageSender> = Arc::new(sender);
    let outcome = sender.send(&email()).await.unwrap();

    mock.assert_async().await;
    assert!(outcome.success);
}

#[tokio::test]
async fn test_pipeline_reports_http_failure_as_false() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/send")
        .with_status(503)
        .create_async()
        .await;

    let sender = HttpMessageSender::with_base_url(server.url(), "test-api-key".to_string());
    let pipeline = SubmissionPipeline::new(
        Arc::new(sender),
        EmailAddress::new("owner@example.com").unwrap(),
    );

    let submission = Submission::Contact(ContactForm {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: EmailAddress::new("jane@x.com").unwrap(),
        company: Some("Acme".to_string()),
        subject: "Hello".to_string(),
        message: "Hi there".to_string(),
    });

    assert!(!pipeline.submit(submission).await);
    assert!(pipeline.sent_messages().is_empty());
    assert!(!pipeline.is_sending());
}
