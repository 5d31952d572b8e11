use std::sync::Arc;

use crate::{
    config::{Config, SamlConfig},
    flows::FlowStore,
    providers::{saml_metadata::resolve_saml, OidcProviderClient, OktaProvider},
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Discovered OIDC client, absent in mock mode or when discovery failed.
    pub oidc: Option<Arc<dyn OidcProviderClient>>,
    /// SAML configuration with a resolved IdP endpoint.
    pub saml: Option<SamlConfig>,
    /// PKCE verifiers for logins in progress.
    pub flows: FlowStore,
}

impl AppState {
    /// Build state for `config`, running OIDC discovery when live OIDC is configured
    /// and loading SAML IdP metadata when a metadata source is set.
    ///
    /// Either failure leaves that flow unavailable instead of aborting startup.
    pub async fn new(config: Config) -> Self {
        let oidc = match (&config.oidc, config.mock_mode) {
            (Some(oidc_config), false) => match OktaProvider::new(oidc_config).await {
                Ok(provider) => Some(Arc::new(provider) as Arc<dyn OidcProviderClient>),
                Err(err) => {
                    tracing::warn!(error = %err, "OIDC discovery failed, OIDC login disabled");
                    None
                }
            },
            _ => None,
        };

        let saml = if config.mock_mode {
            None
        } else {
            match resolve_saml(&config.saml).await {
                Ok(saml) => saml,
                Err(err) => {
                    tracing::warn!(error = %err, "SAML metadata unavailable, SAML login disabled");
                    None
                }
            }
        };

        Self {
            saml,
            ..Self::from_parts(config, oidc)
        }
    }

    /// Build state from an already constructed provider client.
    ///
    /// SAML is available only through an explicit `SAML_IDP_SSO_URL`.
    pub fn from_parts(config: Config, oidc: Option<Arc<dyn OidcProviderClient>>) -> Self {
        Self {
            saml: config.saml.explicit(),
            config: Arc::new(config),
            oidc,
            flows: FlowStore::new(),
        }
    }

    pub fn oidc_ready(&self) -> bool {
        self.oidc.is_some()
    }

    pub fn saml_ready(&self) -> bool {
        self.saml.is_some()
    }
}
