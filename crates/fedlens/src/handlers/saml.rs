//! SAML web SSO: SP-initiated login and the assertion consumer service.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use fedlens_core::saml;
use serde::Deserialize;

use super::pretty_json;
use crate::{
    error::AppError, providers::saml_request::authn_request_url, state::AppState, templates,
};

/// Note shown for live responses, since nothing here checks the XML signature.
pub const SIGNATURE_NOT_VALIDATED: &str =
    "Signature validation was not performed. Do not trust these values.";

/// Form posted to the ACS by the IdP (HTTP-POST binding).
#[derive(Debug, Default, Deserialize)]
pub struct AcsForm {
    #[serde(rename = "SAMLResponse")]
    pub saml_response: Option<String>,
    #[serde(rename = "RelayState")]
    pub relay_state: Option<String>,
    pub mock: Option<String>,
}

/// GET /saml/login - Redirect to the IdP, or post the mock response in mock mode.
pub async fn login(State(state): State<AppState>) -> Result<Response, AppError> {
    if state.config.mock_mode {
        return Ok(Html(templates::saml_post_page(
            "/saml/acs",
            &saml::get_mock_response(),
            true,
        ))
        .into_response());
    }

    let config = state.saml.as_ref().ok_or_else(|| {
        AppError::NotConfigured(
            "SAML IdP is not configured (set OKTA_SAML_METADATA_XML or SAML_IDP_SSO_URL)"
                .to_string(),
        )
    })?;

    let url = authn_request_url(config, None, Utc::now())?;

    tracing::info!(idp = %config.idp_sso_url, "Redirecting to SAML IdP");
    Ok(Redirect::to(url.as_str()).into_response())
}

/// POST /saml/acs - Decode, format and parse the posted SAML Response.
pub async fn acs(
    State(state): State<AppState>,
    Form(form): Form<AcsForm>,
) -> Result<Html<String>, AppError> {
    let saml_response = form
        .saml_response
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or(AppError::MissingSamlResponse)?;

    let is_mock = form.mock.as_deref() == Some("true") || state.config.mock_mode;

    let xml = saml::decode(saml_response)?;
    let formatted_xml = saml::format(&xml);
    let parsed = saml::parse(&xml);

    match parsed.record() {
        Some(record) => tracing::info!(
            issuer = ?record.issuer,
            name_id = ?record.name_id,
            attributes = record.attributes.len(),
            "Parsed SAML Response"
        ),
        None => tracing::warn!(error = ?parsed.error(), "SAML Response did not parse"),
    }

    let mut notes = Vec::new();
    if !is_mock {
        notes.push(SIGNATURE_NOT_VALIDATED.to_string());
    }
    if let Some(relay_state) = form.relay_state.as_deref() {
        notes.push(format!("RelayState: {relay_state}"));
    }

    Ok(Html(templates::saml_results_page(
        &pretty_json(&parsed),
        &formatted_xml,
        &notes,
    )))
}
