use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use fedlens_core::InspectError;
use serde_json::json;
use thiserror::Error;

use crate::templates;

/// Errors raised while driving a login flow, rendered as an HTML error page.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credential could not be decoded for inspection.
    #[error(transparent)]
    Inspect(#[from] InspectError),

    /// The requested flow has no IdP configured.
    #[error("{0}")]
    NotConfigured(String),

    #[error("no SAML response (SAMLResponse) found in the POST body")]
    MissingSamlResponse,

    #[error("callback is missing the authorization code or state")]
    MissingCallbackParams,

    #[error("unknown or expired OIDC state, start the login again")]
    InvalidState,

    /// The IdP redirected back with an `error` parameter.
    #[error("identity provider returned an error: {0}")]
    IdpRejected(String),

    #[error("no ID token returned by the identity provider")]
    MissingIdToken,

    /// OIDC discovery, authorization URL or code exchange failure.
    #[error("OIDC provider error: {0}")]
    Provider(String),

    #[error("failed to build SAML request: {0}")]
    SamlRequest(String),

    #[error("failed to load SAML metadata: {0}")]
    Metadata(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Inspect(_)
            | AppError::MissingSamlResponse
            | AppError::MissingCallbackParams
            | AppError::InvalidState => StatusCode::BAD_REQUEST,
            AppError::IdpRejected(_) | AppError::MissingIdToken => StatusCode::UNAUTHORIZED,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Provider(_) => {
                tracing::error!(error = %self, "OIDC provider error");
                StatusCode::BAD_GATEWAY
            }
            AppError::SamlRequest(_) | AppError::Metadata(_) => {
                tracing::error!(error = %self, "SAML configuration error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_client_error() {
            tracing::warn!(error = %self, "Flow failed");
        }

        (status, Html(templates::error_page(&self.to_string()))).into_response()
    }
}

/// JSON error for the inspection API.
#[derive(Debug)]
pub struct ApiError(InspectError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "Inspection request rejected");

        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl From<InspectError> for ApiError {
    fn from(err: InspectError) -> Self {
        Self(err)
    }
}
