use tracing::{debug, warn};

use crate::{
    form::{FormSurface, LocalValidationError},
    presenter::{NotificationCategory, Notifier},
    transport::{ContactTransport, SubmissionResult},
};

pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact me directly.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed, nothing was sent.
    Rejected(LocalValidationError),
    Sent,
    Failed,
}

/// Handles submissions of the contact form. The page calls [`submit`] instead
/// of letting the browser submit the form and navigate away.
///
/// [`submit`]: FormController::submit
#[derive(Debug, Clone)]
pub struct FormController<Form, Transport, Notify> {
    pub form: Form,
    pub transport: Transport,
    pub notifier: Notify,
}

impl<Form, Transport, Notify> FormController<Form, Transport, Notify>
where
    Form: FormSurface,
    Transport: ContactTransport,
    Notify: Notifier,
{
    /// Validates the form locally, sends it and presents exactly one
    /// notification about the outcome.
    ///
    /// The form is reset only after a successful submission.
    pub async fn submit(&self) -> SubmitOutcome {
        let fields = match self.form.fields().validate() {
            Ok(fields) => fields,
            Err(err) => {
                debug!("rejecting contact form locally: {err}");
                self.notifier
                    .present(err.to_string(), NotificationCategory::Error);
                return SubmitOutcome::Rejected(err);
            }
        };

        let _busy = BusyGuard::enter(&self.form);

        match self.transport.submit(fields).await {
            Ok(SubmissionResult {
                success: true,
                message,
            }) => {
                self.notifier
                    .present(message.unwrap_or_default(), NotificationCategory::Success);
                self.form.reset();
                SubmitOutcome::Sent
            }
            Ok(SubmissionResult {
                success: false,
                message,
            }) => {
                let message = message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.into());
                self.notifier.present(message, NotificationCategory::Error);
                SubmitOutcome::Failed
            }
            Err(err) => {
                warn!("failed to submit contact form: {err}");
                self.notifier
                    .present(TRANSPORT_FAILURE_MESSAGE.into(), NotificationCategory::Error);
                SubmitOutcome::Failed
            }
        }
    }
}

/// Keeps the submit control busy until dropped.
struct BusyGuard<'a, Form: FormSurface>(&'a Form);

impl<'a, Form: FormSurface> BusyGuard<'a, Form> {
    fn enter(form: &'a Form) -> Self {
        form.set_busy(true);
        Self(form)
    }
}

impl<Form: FormSurface> Drop for BusyGuard<'_, Form> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}
