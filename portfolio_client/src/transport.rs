use std::{future::Future, sync::LazyLock};

use portfolio_utils::portfolio_version;
use reqwest::{multipart, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::trace;

use crate::form::ContactFormFields;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let version = portfolio_version();

    format!("Portfolio Contact Form ({homepage}, Version {version})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
};

/// Sends a validated form to the contact acceptor.
#[cfg_attr(test, mockall::automock)]
pub trait ContactTransport: Send + Sync + 'static {
    fn submit(
        &self,
        fields: ContactFormFields,
    ) -> impl Future<Output = Result<SubmissionResult, TransportError>> + Send;
}

/// JSON body returned by the contact acceptor, for successes and failures
/// alike.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to reach the contact endpoint: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpContactTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContactTransport {
    pub fn new(endpoint: Url) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ContactTransport for HttpContactTransport {
    async fn submit(&self, fields: ContactFormFields) -> Result<SubmissionResult, TransportError> {
        let form = multipart::Form::new()
            .text("name", fields.name)
            .text("email", fields.email)
            .text("subject", fields.subject)
            .text("message", fields.message);

        // Error statuses still carry a result body, so the status is not checked.
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        trace!(status = %response.status(), "contact endpoint responded");

        response.json().await.map_err(Into::into)
    }
}

#[cfg(test)]
impl MockContactTransport {
    pub fn with_submit(
        mut self,
        fields: ContactFormFields,
        result: Result<SubmissionResult, TransportError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(fields))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
