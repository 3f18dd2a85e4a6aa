use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub mod contact;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn success(message: impl Into<String>) -> Response {
    Json(ApiResponse {
        success: true,
        message: message.into(),
    })
    .into_response()
}

pub fn failure(code: StatusCode, message: impl ToString) -> Response {
    (
        code,
        Json(ApiResponse {
            success: false,
            message: message.to_string(),
        }),
    )
        .into_response()
}
