use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use portfolio_client::{
    form::ContactFormFields,
    transport::{ContactTransport, HttpContactTransport, SubmissionResult, TransportError},
};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<(String, String)>>>;

async fn start(status: StatusCode, body: &'static str) -> (SocketAddr, Received) {
    let received = Received::default();
    let router = Router::new()
        .route(
            "/contact",
            post(
                move |State(received): State<Received>, headers: HeaderMap, mut form: Multipart| async move {
                    assert!(headers[header::USER_AGENT]
                        .to_str()
                        .unwrap()
                        .starts_with("Portfolio Contact Form"));
                    while let Some(field) = form.next_field().await.unwrap() {
                        let name = field.name().unwrap().to_owned();
                        let value = field.text().await.unwrap();
                        received.lock().unwrap().push((name, value));
                    }
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                },
            ),
        )
        .with_state(Arc::clone(&received));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    (addr, received)
}

fn transport(addr: SocketAddr) -> HttpContactTransport {
    HttpContactTransport::new(format!("http://{addr}/contact").parse().unwrap()).unwrap()
}

fn fields() -> ContactFormFields {
    ContactFormFields {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        subject: "No Subject".into(),
        message: "Hi".into(),
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let (addr, received) = start(StatusCode::OK, r#"{"success":true,"message":"Thanks!"}"#).await;
    let sut = transport(addr);

    // Act
    let result = sut.submit(fields()).await;

    // Assert
    assert_eq!(
        result.unwrap(),
        SubmissionResult {
            success: true,
            message: Some("Thanks!".into())
        }
    );
    assert_eq!(
        *received.lock().unwrap(),
        [
            ("name".to_owned(), "Alice".to_owned()),
            ("email".into(), "alice@example.com".into()),
            ("subject".into(), "No Subject".into()),
            ("message".into(), "Hi".into()),
        ]
    );
}

#[tokio::test]
async fn structured_failure() {
    // Arrange
    let (addr, _) = start(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"message":"Spam detected."}"#,
    )
    .await;
    let sut = transport(addr);

    // Act
    let result = sut.submit(fields()).await;

    // Assert
    assert_eq!(
        result.unwrap(),
        SubmissionResult {
            success: false,
            message: Some("Spam detected.".into())
        }
    );
}

#[tokio::test]
async fn failure_without_message() {
    // Arrange
    let (addr, _) = start(StatusCode::INTERNAL_SERVER_ERROR, r#"{"success":false}"#).await;
    let sut = transport(addr);

    // Act
    let result = sut.submit(fields()).await;

    // Assert
    assert_eq!(
        result.unwrap(),
        SubmissionResult {
            success: false,
            message: None
        }
    );
}

#[tokio::test]
async fn not_json() {
    // Arrange
    let (addr, _) = start(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").await;
    let sut = transport(addr);

    // Act
    let result = sut.submit(fields()).await;

    // Assert
    assert!(matches!(result, Err(TransportError::Request(_))));
}

#[tokio::test]
async fn unreachable() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let sut = transport(addr);

    // Act
    let result = sut.submit(fields()).await;

    // Assert
    assert!(matches!(result, Err(TransportError::Request(_))));
}
