use std::net::SocketAddr;

use portfolio_api_rest::RestServer;
use portfolio_core_contact_contracts::{
    ContactSendMessageError, MockContactService, CONTACT_SUCCESS_MESSAGE,
};
use portfolio_models::contact::{ContactFieldError, ContactSubmission, ContactValidationErrors};
use pretty_assertions::assert_eq;
use reqwest::{header, multipart, Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn start(service: MockContactService) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(RestServer::new(service).serve_listener(listener));
    addr
}

fn url(addr: SocketAddr) -> String {
    format!("http://{addr}/contact")
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: Some("Alice".into()),
        email: Some("alice@example.com".into()),
        subject: Some("No Subject".into()),
        message: Some("Hi".into()),
        website: None,
    }
}

fn form() -> multipart::Form {
    multipart::Form::new()
        .text("name", "Alice")
        .text("email", "alice@example.com")
        .text("subject", "No Subject")
        .text("message", "Hi")
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn ok_multipart() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service =
        MockContactService::new().with_send_message(submission(), Some(addr.to_string()), Ok(()));
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .header(header::ORIGIN, "https://portfolio.example")
        .multipart(form())
        .send()
        .await
        .unwrap();

    // Assert
    let headers = response.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.contains_key("x-request-id"));
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": CONTACT_SUCCESS_MESSAGE})
    );
}

#[tokio::test]
async fn ok_urlencoded() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = MockContactService::new().with_send_message(
        ContactSubmission {
            subject: None,
            website: Some("".into()),
            ..submission()
        },
        Some(addr.to_string()),
        Ok(()),
    );
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .form(&[
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("message", "Hi"),
            ("website", ""),
        ])
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn invalid() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = MockContactService::new().with_send_message(
        ContactSubmission {
            email: Some("not-an-email".into()),
            ..submission()
        },
        Some(addr.to_string()),
        Err(ContactValidationErrors(vec![ContactFieldError::EmailInvalid]).into()),
    );
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .multipart(form().text("email", "not-an-email"))
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Please enter a valid email address."})
    );
}

#[tokio::test]
async fn spam() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = MockContactService::new().with_send_message(
        ContactSubmission {
            website: Some("http://spam.example".into()),
            ..submission()
        },
        Some(addr.to_string()),
        Err(ContactSendMessageError::Spam),
    );
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .multipart(form().text("website", "http://spam.example"))
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Spam detected."}));
}

#[tokio::test]
async fn send_failed() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = MockContactService::new().with_send_message(
        submission(),
        Some(addr.to_string()),
        Err(ContactSendMessageError::Send {
            recipient: "owner@example.com".parse().unwrap(),
        }),
    );
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .multipart(form())
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .ends_with("contact me directly at owner@example.com"));
}

#[tokio::test]
async fn missing_content_type_is_an_empty_form() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let service = MockContactService::new().with_send_message(
        ContactSubmission::default(),
        Some(addr.to_string()),
        Err(ContactValidationErrors(vec![
            ContactFieldError::NameRequired,
            ContactFieldError::EmailRequired,
            ContactFieldError::MessageRequired,
        ])
        .into()),
    );
    tokio::spawn(RestServer::new(service).serve_listener(listener));

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Name is required. Email is required. Message is required."
    );
}

#[tokio::test]
async fn malformed_multipart() {
    // Arrange
    let addr = start(MockContactService::new()).await;

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .header(header::CONTENT_TYPE, "multipart/form-data")
        .body("garbage")
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Invalid form data."}));
}

#[tokio::test]
async fn method_not_allowed() {
    // Arrange
    let addr = start(MockContactService::new()).await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        // Act
        let response = reqwest::Client::new()
            .request(method, url(addr))
            .send()
            .await
            .unwrap();

        // Assert
        let (status, body) = read(response).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body,
            json!({"success": false, "message": "Method not allowed. Please use POST request."})
        );
    }
}

#[tokio::test]
async fn cors_preflight() {
    // Arrange
    let addr = start(MockContactService::new()).await;

    // Act
    let response = reqwest::Client::new()
        .request(Method::OPTIONS, url(addr))
        .header(header::ORIGIN, "https://portfolio.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .contains("POST"));
    assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .contains("content-type"));
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn plain_options() {
    // Arrange
    let addr = start(MockContactService::new()).await;

    // Act
    let response = reqwest::Client::new()
        .request(Method::OPTIONS, url(addr))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn handler_panic() {
    // Arrange
    // no expectation is set up, so the mock panics when called
    let addr = start(MockContactService::new()).await;

    // Act
    let response = reqwest::Client::new()
        .post(url(addr))
        .multipart(form())
        .send()
        .await
        .unwrap();

    // Assert
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "Internal server error"})
    );
}
