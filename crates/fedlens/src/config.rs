use std::env;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_AUTH_SERVER_ID: &str = "default";
const DEFAULT_SP_ENTITY_ID: &str = "okta-debug-auth-sp";

/// OIDC client configuration for the live authorization-code flow.
#[derive(Debug, Clone, PartialEq)]
pub struct OidcConfig {
    /// Okta org URL, e.g. `https://dev-123.okta.com`.
    pub domain: String,
    /// Authorization server ID. Empty means the org authorization server.
    pub auth_server_id: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: Url,
}

impl OidcConfig {
    /// Issuer URL that discovery runs against.
    ///
    /// Discovery appends `/.well-known/openid-configuration` to this.
    pub fn issuer_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if self.auth_server_id.is_empty() {
            domain.to_string()
        } else {
            format!("{}/oauth2/{}", domain, self.auth_server_id)
        }
    }
}

/// SAML service provider settings.
///
/// The IdP SSO endpoint comes from `idp_sso_url` when set, otherwise from the
/// IdP metadata at `metadata_source`, which is resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SamlSettings {
    /// Metadata URL (`http://` or `https://`) or local file path.
    pub metadata_source: Option<String>,
    /// Explicit SSO URL, takes precedence over metadata.
    pub idp_sso_url: Option<Url>,
    pub sp_entity_id: String,
    pub acs_url: Url,
}

impl SamlSettings {
    pub fn is_configured(&self) -> bool {
        self.metadata_source.is_some() || self.idp_sso_url.is_some()
    }

    /// Resolved configuration when the SSO URL was given directly.
    pub fn explicit(&self) -> Option<SamlConfig> {
        self.idp_sso_url.clone().map(|url| self.with_sso_url(url))
    }

    pub fn with_sso_url(&self, idp_sso_url: Url) -> SamlConfig {
        SamlConfig {
            idp_sso_url,
            sp_entity_id: self.sp_entity_id.clone(),
            acs_url: self.acs_url.clone(),
        }
    }
}

/// SAML service provider configuration with a known IdP endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SamlConfig {
    pub idp_sso_url: Url,
    pub sp_entity_id: String,
    pub acs_url: Url,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Serve mock credentials instead of talking to an IdP.
    pub mock_mode: bool,
    pub base_url: Url,
    /// Present when the OIDC client is configured.
    pub oidc: Option<OidcConfig>,
    pub saml: SamlSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BASE_URL` - Public URL of this server (default: `http://localhost:8000`)
    /// - `OKTA_DOMAIN` - Okta org URL (enables OIDC together with `OKTA_CLIENT_ID`)
    /// - `OKTA_AUTH_SERVER_ID` - Authorization server ID (default: `default`, empty for the org server)
    /// - `OKTA_CLIENT_ID` - OIDC client ID
    /// - `OKTA_CLIENT_SECRET` - OIDC client secret (optional)
    /// - `REDIRECT_URI` - OIDC callback URL (default: `{BASE_URL}/oidc/callback`)
    /// - `OKTA_SAML_METADATA_XML` - IdP metadata URL or file path (enables SAML)
    /// - `SAML_IDP_SSO_URL` - IdP single sign-on URL, overrides the metadata
    /// - `SAML_SP_ENTITY_ID` - Service provider entity ID (default: `okta-debug-auth-sp`)
    ///
    /// # Errors
    ///
    /// Returns an error if one of the URL variables does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, treating empty values as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url: Url = var("BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .parse()
            .context("BASE_URL must be a valid URL")?;

        let oidc = match (var("OKTA_DOMAIN"), var("OKTA_CLIENT_ID")) {
            (Some(domain), Some(client_id)) => {
                let redirect_uri = match var("REDIRECT_URI") {
                    Some(uri) => uri.parse().context("REDIRECT_URI must be a valid URL")?,
                    None => base_url.join("/oidc/callback")?,
                };

                Some(OidcConfig {
                    domain,
                    // Set-but-empty selects the org server, so read it raw.
                    auth_server_id: lookup("OKTA_AUTH_SERVER_ID")
                        .map(|v| v.trim().to_string())
                        .unwrap_or_else(|| DEFAULT_AUTH_SERVER_ID.to_string()),
                    client_id,
                    client_secret: var("OKTA_CLIENT_SECRET"),
                    redirect_uri,
                })
            }
            _ => None,
        };

        let saml = SamlSettings {
            metadata_source: var("OKTA_SAML_METADATA_XML").map(|v| v.trim().to_string()),
            idp_sso_url: var("SAML_IDP_SSO_URL")
                .map(|url| url.parse())
                .transpose()
                .context("SAML_IDP_SSO_URL must be a valid URL")?,
            sp_entity_id: var("SAML_SP_ENTITY_ID")
                .unwrap_or_else(|| DEFAULT_SP_ENTITY_ID.to_string()),
            acs_url: base_url.join("/saml/acs")?,
        };

        Ok(Self {
            mock_mode: false,
            base_url,
            oidc,
            saml,
        })
    }

    pub fn with_mock_mode(mut self, mock_mode: bool) -> Self {
        self.mock_mode = mock_mode;
        self
    }
}
