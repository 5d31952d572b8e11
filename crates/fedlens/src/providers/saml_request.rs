//! SP-initiated SAML login over the HTTP-Redirect binding.

use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use flate2::{write::DeflateEncoder, Compression};
use url::Url;

use crate::config::SamlConfig;
use crate::error::AppError;

/// Build the unsigned AuthnRequest document for `config`.
pub fn authn_request_xml(config: &SamlConfig, request_id: &str, now: DateTime<Utc>) -> String {
    format!(
        r#"<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="{id}" Version="2.0" IssueInstant="{instant}" Destination="{destination}" ProtocolBinding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" AssertionConsumerServiceURL="{acs}"><saml:Issuer>{issuer}</saml:Issuer><samlp:NameIDPolicy Format="urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" AllowCreate="true"/></samlp:AuthnRequest>"#,
        id = request_id,
        instant = now.format("%Y-%m-%dT%H:%M:%SZ"),
        destination = xml_attr(config.idp_sso_url.as_str()),
        acs = xml_attr(config.acs_url.as_str()),
        issuer = xml_attr(&config.sp_entity_id),
    )
}

/// Build the IdP redirect URL carrying a deflated, base64 encoded AuthnRequest.
///
/// # Errors
///
/// Returns [`AppError::SamlRequest`] if compression fails.
pub fn authn_request_url(
    config: &SamlConfig,
    relay_state: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Url, AppError> {
    let request_id = format!("_id{}", uuid::Uuid::new_v4());
    let xml = authn_request_xml(config, &request_id, now);
    let encoded = deflate_and_encode(&xml)?;

    let mut url = config.idp_sso_url.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("SAMLRequest", &encoded);
        if let Some(relay_state) = relay_state {
            query.append_pair("RelayState", relay_state);
        }
    }

    tracing::debug!(request_id = %request_id, idp = %config.idp_sso_url, "Created SAML AuthnRequest redirect");
    Ok(url)
}

fn deflate_and_encode(xml: &str) -> Result<String, AppError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .map_err(|e| AppError::SamlRequest(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| AppError::SamlRequest(e.to_string()))?;
    Ok(STANDARD.encode(compressed))
}

fn xml_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
