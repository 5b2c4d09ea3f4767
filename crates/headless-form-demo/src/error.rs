// File: src/error.rs
// Purpose: Request-level errors and their HTML responses

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use headless_form::FormError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] FormError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Form(FormError::UnknownField(_)) => StatusCode::NOT_FOUND,
            AppError::Form(FormError::TypeMismatch { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Form(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "request failed");
        error_response(status, &self.to_string())
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let markup = maud::html! {
        (maud::DOCTYPE)
        html {
            head { title { (title) } }
            body {
                h1 { (status.as_u16()) " " (title) }
                p { (message) }
                a href="/" { "Go Home" }
            }
        }
    };
    (status, Html(markup.into_string())).into_response()
}
