use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use super::{Claims, UnverifiedToken};
use crate::{InspectError, Result};

/// Split a compact JWT into header, payload and signature without verifying it.
///
/// The token must have exactly three `.`-separated segments. The first two
/// must each be base64url (padding optional) encoding a JSON object. The
/// signature segment is kept as-is and never checked.
///
/// # Errors
///
/// Returns [`InspectError::MalformedToken`] naming the failing segment and
/// the underlying decode or JSON error.
pub fn decode_unverified(token: &str) -> Result<UnverifiedToken> {
    let segments: Vec<&str> = token.trim().split('.').collect();

    let [header, payload, signature] = segments.as_slice() else {
        return Err(InspectError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let header = decode_segment("header", header)?;
    let payload = decode_segment("payload", payload)?;

    tracing::debug!(
        alg = ?header.get("alg"),
        claims = payload.len(),
        "Decoded unverified JWT"
    );

    Ok(UnverifiedToken {
        header,
        payload,
        signature: (*signature).to_string(),
    })
}

/// Header and payload of an ID token, decoded without verification.
///
/// Shorthand for [`decode_unverified`] when the signature is not needed.
pub fn parse_id_token(token: &str) -> Result<(Claims, Claims)> {
    decode_unverified(token).map(UnverifiedToken::into_parts)
}

fn decode_segment(name: &str, segment: &str) -> Result<Claims> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| InspectError::MalformedToken(format!("{name} is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| InspectError::MalformedToken(format!("{name} is not a JSON object: {e}")))
}
