use reqwest::StatusCode;

use crate::api::client::Method;

/// One failed call. Displays as `GET /users/1 failed: <cause>`.
#[derive(Debug, thiserror::Error)]
#[error("{method} {path} failed: {kind}")]
pub struct ApiError {
    pub method: Method,
    pub path: String,
    #[source]
    pub kind: ApiErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status code {0}")]
    Status(StatusCode),
}

impl ApiError {
    pub fn new(method: Method, path: &str, kind: impl Into<ApiErrorKind>) -> Self {
        Self {
            method,
            path: path.to_string(),
            kind: kind.into(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match &self.kind {
            ApiErrorKind::Status(status) => Some(*status),
            ApiErrorKind::Http(err) => err.status(),
            ApiErrorKind::Encode(_) => None,
        }
    }
}
