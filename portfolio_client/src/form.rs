use portfolio_models::{contact::ContactMessageSubject, email_address::is_email_shaped};
use thiserror::Error;

/// Current values of the contact form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocalValidationError {
    #[error("Please fill in all required fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Capability interface of the rendered contact form.
#[cfg_attr(test, mockall::automock)]
pub trait FormSurface: Send + Sync + 'static {
    fn fields(&self) -> ContactFormFields;

    /// Disables the submit control and shows a loading indicator, or
    /// restores the original control.
    fn set_busy(&self, busy: bool);

    /// Clears all inputs.
    fn reset(&self);
}

impl ContactFormFields {
    /// Trims all fields and checks them without contacting the server.
    ///
    /// A blank subject is replaced by the subject placeholder.
    pub fn validate(&self) -> Result<Self, LocalValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(LocalValidationError::MissingField);
        }

        if !is_email_shaped(email) {
            return Err(LocalValidationError::InvalidEmail);
        }

        Ok(Self {
            name: name.into(),
            email: email.into(),
            subject: ContactMessageSubject::or_placeholder(Some(&self.subject)).to_string(),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(name: &str, email: &str, subject: &str, message: &str) -> ContactFormFields {
        ContactFormFields {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn ok() {
        let result = fields(" Alice ", " alice@example.com\n", "  ", "\tHi ").validate();

        assert_eq!(
            result.unwrap(),
            fields("Alice", "alice@example.com", "No Subject", "Hi")
        );
    }

    #[test]
    fn keeps_subject() {
        let result = fields("Alice", "alice@example.com", " Hello ", "Hi").validate();

        assert_eq!(result.unwrap().subject, "Hello");
    }

    #[test]
    fn missing_field() {
        for input in [
            fields("", "alice@example.com", "", "Hi"),
            fields("Alice", "   ", "", "Hi"),
            fields("Alice", "alice@example.com", "Subject", " \n "),
            ContactFormFields::default(),
        ] {
            assert_eq!(input.validate(), Err(LocalValidationError::MissingField));
        }
    }

    #[test]
    fn invalid_email() {
        for email in ["not-an-email", "alice@localhost", "a@b@c.de", "al ice@example.com"] {
            assert_eq!(
                fields("Alice", email, "", "Hi").validate(),
                Err(LocalValidationError::InvalidEmail),
                "{email}"
            );
        }
    }
}
