use std::future::Future;

use portfolio_models::{
    contact::{ContactSubmission, ContactValidationErrors},
    email_address::EmailAddress,
};
use thiserror::Error;

pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. I'll get back to you soon!";

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validates the submission and relays it to the site owner by email.
    ///
    /// `host` is the host name the request was addressed to and is used to
    /// derive the sender address of the notification.
    fn send_message(
        &self,
        submission: ContactSubmission,
        host: Option<String>,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Spam detected.")]
    Spam,
    #[error(transparent)]
    Invalid(#[from] ContactValidationErrors),
    #[error(
        "Sorry, there was an error sending your message. Please try again later or contact me \
         directly at {recipient}"
    )]
    Send { recipient: EmailAddress },
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        host: Option<String>,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(host),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
