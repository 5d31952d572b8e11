//! Identity provider clients.
//!
//! - [`OktaProvider`]: live OIDC authorization-code flow via discovery
//! - [`saml_metadata`]: IdP metadata loading for the SAML endpoint
//! - [`saml_request`]: SP-initiated SAML AuthnRequest redirects

mod okta;
pub mod saml_metadata;
pub mod saml_request;

use async_trait::async_trait;
use url::Url;

use crate::error::AppError;

pub use okta::OktaProvider;

/// Abstraction over an OIDC identity provider.
#[async_trait]
pub trait OidcProviderClient: Send + Sync {
    /// Generate authorization URL for user redirect.
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url, AppError>;

    /// Exchange an authorization code for the raw ID token string.
    ///
    /// The token is returned as received; it is not validated.
    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<String, AppError>;
}
