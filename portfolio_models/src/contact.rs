use nutype::nutype;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    email_address::{is_email_shaped, EmailAddress},
    markup::escape_html,
};

/// Subject used when the sender leaves the subject blank.
pub const CONTACT_SUBJECT_PLACEHOLDER: &str = "No Subject";

/// The form fields of a single contact attempt, exactly as they were
/// received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    /// Honeypot field, hidden from human visitors.
    pub website: Option<String>,
}

/// A [`ContactSubmission`] whose fields have been trimmed and escaped, but
/// not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: ContactMessageSubject,
    pub message: String,
    pub honeypot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Display, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    validate(not_empty),
    default = CONTACT_SUBJECT_PLACEHOLDER,
    derive(Debug, Clone, PartialEq, Eq, Display, Default, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, Display, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

impl ContactMessageSubject {
    /// Returns the trimmed subject, or the placeholder if it is absent or
    /// blank.
    pub fn or_placeholder(subject: Option<&str>) -> Self {
        subject
            .and_then(|subject| Self::try_new(subject.trim()).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFieldError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Please enter a valid email address.")]
    EmailInvalid,
    #[error("Message is required.")]
    MessageRequired,
}

/// Every field error found in a submission, in the order name, email,
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationErrors(pub Vec<ContactFieldError>);

impl std::fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut errors = self.0.iter();
        if let Some(first) = errors.next() {
            first.fmt(f)?;
        }
        for err in errors {
            write!(f, " {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactValidationErrors {}

impl ContactSubmission {
    pub fn sanitize(&self) -> SanitizedContactSubmission {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(|x| escape_html(x.trim()))
                .unwrap_or_default()
        };

        SanitizedContactSubmission {
            name: field(&self.name),
            email: field(&self.email),
            subject: ContactMessageSubject::or_placeholder(
                self.subject.as_deref().map(escape_html).as_deref(),
            ),
            message: field(&self.message),
            honeypot: self.website.clone(),
        }
    }
}

impl SanitizedContactSubmission {
    /// Whether the honeypot field has been filled in.
    pub fn is_spam(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|x| !x.is_empty())
    }

    pub fn validate(self) -> Result<ContactMessage, ContactValidationErrors> {
        let mut errors = Vec::new();

        let name = ContactMessageAuthorName::try_new(self.name)
            .map_err(|_| errors.push(ContactFieldError::NameRequired))
            .ok();

        let email = if self.email.is_empty() {
            errors.push(ContactFieldError::EmailRequired);
            None
        } else {
            let email = is_email_shaped(&self.email)
                .then(|| self.email.parse::<EmailAddress>().ok())
                .flatten();
            if email.is_none() {
                errors.push(ContactFieldError::EmailInvalid);
            }
            email
        };

        let content = ContactMessageContent::try_new(self.message)
            .map_err(|_| errors.push(ContactFieldError::MessageRequired))
            .ok();

        match (name, email, content) {
            (Some(name), Some(email), Some(content)) => Ok(ContactMessage {
                author: ContactMessageAuthor { name, email },
                subject: self.subject,
                content,
            }),
            _ => Err(ContactValidationErrors(errors)),
        }
    }
}
