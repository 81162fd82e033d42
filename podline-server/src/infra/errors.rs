use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use podline_core::CardError;

pub const MSG_URL_REQUIRED: &str = "URL is required";
pub const MSG_EXTRACT_FAILED: &str =
    "Unable to extract data. Please check the URL.";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch the URL.";

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// Clients only ever see the fixed messages; detail stays in the logs.
impl From<CardError> for AppError {
    fn from(err: CardError) -> Self {
        match &err {
            CardError::MissingLink => Self::bad_request(MSG_URL_REQUIRED),
            CardError::InvalidLink { link, reason } => {
                tracing::debug!(%link, %reason, "rejected link");
                Self::bad_request(MSG_URL_REQUIRED)
            }
            CardError::MetadataMissing(field) => {
                tracing::info!(field, "page is missing required metadata");
                Self::not_found(MSG_EXTRACT_FAILED)
            }
            CardError::PageFetch(source) => {
                tracing::error!(error = %source, timeout = err.is_timeout(), "page fetch failed");
                Self::internal(MSG_FETCH_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podline_core::{FetchError, parse_link};

    #[test]
    fn test_card_errors_map_to_client_messages() {
        let cases = [
            (CardError::MissingLink, StatusCode::BAD_REQUEST, MSG_URL_REQUIRED),
            (
                CardError::InvalidLink {
                    link: "nope".into(),
                    reason: "relative URL without a base".into(),
                },
                StatusCode::BAD_REQUEST,
                MSG_URL_REQUIRED,
            ),
            (
                CardError::MetadataMissing("og:image"),
                StatusCode::NOT_FOUND,
                MSG_EXTRACT_FAILED,
            ),
            (
                CardError::PageFetch(FetchError::Timeout {
                    url: "https://slow.example".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_FETCH_FAILED,
            ),
            (
                CardError::PageFetch(FetchError::Status {
                    url: "https://gone.example".into(),
                    status: 410,
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_FETCH_FAILED,
            ),
        ];

        for (err, status, message) in cases {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status, status);
            assert_eq!(app_err.message, message);
        }
    }

    #[test]
    fn test_rejected_links_share_the_missing_link_message() {
        for link in ["", "   ", "not a url", "example.com/ep", "mailto:host@example.com"] {
            let err = parse_link(link).unwrap_err();
            let app_err = AppError::from(err);
            assert_eq!(app_err.status, StatusCode::BAD_REQUEST, "{link:?}");
            assert_eq!(app_err.message, MSG_URL_REQUIRED, "{link:?}");
        }
    }
}
