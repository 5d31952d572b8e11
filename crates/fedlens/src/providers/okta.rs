//! Okta OIDC provider implementation.

use async_trait::async_trait;
use openidconnect::{
    core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata},
    reqwest, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointMaybeSet, EndpointSet,
    IssuerUrl, Nonce, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};
use url::Url;

use super::OidcProviderClient;
use crate::config::OidcConfig;
use crate::error::AppError;
use crate::flows::generate_state;

/// Client type produced by `from_provider_metadata` + `set_redirect_uri`.
///
/// Auth URL is always set by discovery; token and userinfo URLs may be.
type ConfiguredCoreClient = CoreClient<
    EndpointSet,
    openidconnect::EndpointNotSet,
    openidconnect::EndpointNotSet,
    openidconnect::EndpointNotSet,
    EndpointMaybeSet,
    EndpointMaybeSet,
>;

/// Scopes requested on top of `openid`.
const SCOPES: [&str; 3] = ["profile", "email", "groups"];

/// Okta OIDC provider.
pub struct OktaProvider {
    client: ConfiguredCoreClient,
    http_client: reqwest::Client,
}

impl OktaProvider {
    /// Create a new Okta provider by discovering the OIDC metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issuer URL is invalid
    /// - Discovery fails (network error or invalid metadata)
    /// - The redirect URI is invalid
    pub async fn new(config: &OidcConfig) -> Result<Self, AppError> {
        let issuer_url =
            IssuerUrl::new(config.issuer_url()).map_err(|e| AppError::Provider(e.to_string()))?;

        // Build HTTP client without redirect following (security requirement)
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let client = CoreClient::from_provider_metadata(
            provider_metadata,
            ClientId::new(config.client_id.clone()),
            config.client_secret.clone().map(ClientSecret::new),
        )
        .set_redirect_uri(
            RedirectUrl::new(config.redirect_uri.to_string())
                .map_err(|e| AppError::Provider(e.to_string()))?,
        );

        tracing::info!(issuer = %config.issuer_url(), "Discovered OIDC provider");

        Ok(Self {
            client,
            http_client,
        })
    }
}

#[async_trait]
impl OidcProviderClient for OktaProvider {
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url, AppError> {
        let state_owned = state.to_string();
        let pkce_challenge_owned = pkce_challenge.to_string();

        // The challenge is computed by the caller, so it goes in as raw params.
        let mut request = self.client.authorize_url(
            CoreAuthenticationFlow::AuthorizationCode,
            move || CsrfToken::new(state_owned),
            || Nonce::new(generate_state()),
        );
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let (auth_url, _csrf_token, _nonce) = request
            .add_extra_param("code_challenge", pkce_challenge_owned)
            .add_extra_param("code_challenge_method", "S256")
            .url();

        Ok(auth_url)
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<String, AppError> {
        let token_response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| AppError::Provider(e.to_string()))?
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        // Claims are deliberately not read through the verifier.
        let id_token = token_response.id_token().ok_or(AppError::MissingIdToken)?;

        Ok(id_token.to_string())
    }
}
