//! IdP metadata loading for the SAML login flow.

use fedlens_core::saml::{parse_idp_metadata, HTTP_REDIRECT_BINDING};
use openidconnect::reqwest;
use url::Url;

use crate::{
    config::{SamlConfig, SamlSettings},
    error::AppError,
};

/// Read IdP metadata from an `http(s)://` URL or a local file path.
pub async fn load_metadata(source: &str) -> Result<String, AppError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let http_client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|e| AppError::Metadata(format!("Failed to build HTTP client: {}", e)))?;

        http_client
            .get(source)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::Metadata(e.to_string()))?
            .text()
            .await
            .map_err(|e| AppError::Metadata(e.to_string()))
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| AppError::Metadata(format!("{source}: {e}")))
    }
}

/// Resolve the SAML configuration.
///
/// An explicit `SAML_IDP_SSO_URL` wins. Otherwise the HTTP-Redirect
/// `SingleSignOnService` location is taken from the metadata. Returns `None`
/// when neither is configured.
pub async fn resolve_saml(settings: &SamlSettings) -> Result<Option<SamlConfig>, AppError> {
    if let Some(config) = settings.explicit() {
        return Ok(Some(config));
    }

    let Some(source) = settings.metadata_source.as_deref() else {
        return Ok(None);
    };

    let xml = load_metadata(source).await?;
    let metadata = parse_idp_metadata(&xml)?;

    let location = metadata
        .sso_location(HTTP_REDIRECT_BINDING)
        .ok_or_else(|| {
            AppError::Metadata("no HTTP-Redirect SingleSignOnService in metadata".to_string())
        })?;
    let idp_sso_url: Url = location
        .parse()
        .map_err(|e| AppError::Metadata(format!("invalid SSO location {location:?}: {e}")))?;

    tracing::info!(
        entity_id = ?metadata.entity_id,
        idp = %idp_sso_url,
        "Loaded SAML IdP metadata"
    );

    Ok(Some(settings.with_sso_url(idp_sso_url)))
}
