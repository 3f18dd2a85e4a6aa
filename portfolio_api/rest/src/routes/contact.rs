use std::sync::Arc;

use axum::{
    extract::{Host, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};
use portfolio_core_contact_contracts::{
    ContactSendMessageError, ContactService, CONTACT_SUCCESS_MESSAGE,
};

use super::{failure, success};
use crate::extractors::contact_form::ContactForm;

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            "/contact",
            routing::post(send_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    host: Option<Host>,
    ContactForm(submission): ContactForm,
) -> Response {
    match service
        .send_message(submission, host.map(|Host(host)| host))
        .await
    {
        Ok(()) => success(CONTACT_SUCCESS_MESSAGE),
        Err(err @ (ContactSendMessageError::Spam | ContactSendMessageError::Invalid(_))) => {
            failure(StatusCode::BAD_REQUEST, err)
        }
        Err(err @ ContactSendMessageError::Send { .. }) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
    }
}

/// Empty acknowledgement that still declares the JSON content type like every
/// other response of this endpoint.
async fn preflight() -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")]).into_response()
}

async fn method_not_allowed() -> Response {
    failure(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed. Please use POST request.",
    )
}
