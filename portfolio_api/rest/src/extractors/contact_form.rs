use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Response,
    Form,
};
use portfolio_models::contact::ContactSubmission;
use tracing::debug;

use crate::routes::failure;

/// Contact form fields, sent either as `multipart/form-data` or as
/// `application/x-www-form-urlencoded`.
///
/// Any other body is treated as an empty form.
#[derive(Debug)]
pub struct ContactForm(pub ContactSubmission);

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(invalid_form_data)?;
            return read_multipart(multipart).await.map(Self);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(submission) = Form::<ContactSubmission>::from_request(request, state)
                .await
                .map_err(invalid_form_data)?;
            return Ok(Self(submission));
        }

        Ok(Self(ContactSubmission::default()))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ContactSubmission, Response> {
    let mut submission = ContactSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form_data)? {
        let slot = match field.name() {
            Some("name") => &mut submission.name,
            Some("email") => &mut submission.email,
            Some("subject") => &mut submission.subject,
            Some("message") => &mut submission.message,
            Some("website") => &mut submission.website,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(invalid_form_data)?);
    }

    Ok(submission)
}

fn invalid_form_data(err: impl std::fmt::Display) -> Response {
    debug!("failed to read contact form: {err}");
    failure(StatusCode::BAD_REQUEST, "Invalid form data.")
}
