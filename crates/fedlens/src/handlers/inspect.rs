//! JSON inspection API for pasting credentials obtained elsewhere.

use axum::Json;
use fedlens_core::{
    jwt::{decode_unverified, Claims},
    saml::{self, ParsedResponse},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct JwtRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct JwtResponse {
    pub header: Claims,
    pub payload: Claims,
    /// Whether the header names an allow-listed algorithm. Nothing is verified.
    pub algorithm_accepted: bool,
}

#[derive(Debug, Deserialize)]
pub struct SamlRequest {
    pub saml_response: String,
}

#[derive(Debug, Serialize)]
pub struct SamlResponse {
    pub parsed: ParsedResponse,
    pub formatted_xml: String,
}

/// POST /api/inspect/jwt
pub async fn inspect_jwt(Json(request): Json<JwtRequest>) -> Result<Json<JwtResponse>, ApiError> {
    let token = decode_unverified(&request.token)?;
    let algorithm_accepted = token.is_accepted_algorithm();
    let (header, payload) = token.into_parts();

    Ok(Json(JwtResponse {
        header,
        payload,
        algorithm_accepted,
    }))
}

/// POST /api/inspect/saml
///
/// Undecodable base64 is rejected; XML that does not parse is reported in
/// `parsed.error` with a 200.
pub async fn inspect_saml(
    Json(request): Json<SamlRequest>,
) -> Result<Json<SamlResponse>, ApiError> {
    let xml = saml::decode(&request.saml_response)?;

    Ok(Json(SamlResponse {
        parsed: saml::parse(&xml),
        formatted_xml: saml::format(&xml),
    }))
}
