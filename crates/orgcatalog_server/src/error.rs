//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"detail": "..."}` with a status code
//! derived from the catalog error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use orgcatalog_core::CatalogError;
use serde_json::json;
use std::fmt::{Display, Formatter};

pub const INVALID_API_KEY_DETAIL: &str = "Invalid API Key";

#[derive(Debug)]
pub enum ApiError {
    Forbidden,
    NotFound(&'static str),
    /// Malformed or out-of-range request input.
    Unprocessable(String),
    /// Details are logged, not returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Forbidden => INVALID_API_KEY_DETAIL.to_string(),
            Self::NotFound(detail) => (*detail).to_string(),
            Self::Unprocessable(detail) => detail.clone(),
            Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(message) => write!(f, "internal error: {message}"),
            other => write!(f, "{}", other.detail()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::InvalidQuery(message) => Self::Unprocessable(message),
            CatalogError::BuildingNotFound(_) => Self::NotFound("Building not found"),
            CatalogError::BusinessNotFound(_) => Self::NotFound("Business not found"),
            CatalogError::OrganizationNotFound(_) => Self::NotFound("Organization not found"),
            CatalogError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(message) = &self {
            error!("event=http_error module=server status=error error={message}");
        }
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
