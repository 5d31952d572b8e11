//! Mock OIDC ID token for flows without a live IdP.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::{InspectError, Result};

/// Symmetric key the mock token is signed with. It carries no trust.
const MOCK_SIGNING_KEY: &[u8] = b"mock_secret";
const MOCK_KEY_ID: &str = "mock-key-id-12345";

/// Generate a mock ID token issued now.
///
/// See [`mock_token_at`].
pub fn get_mock_token() -> Result<String> {
    mock_token_at(Utc::now())
}

/// Generate a mock ID token issued at `now`.
///
/// The token is HS256-signed so that generic JWT tooling accepts its shape.
/// Its payload mixes scalar, numeric and array claims. `iat`, `exp` and
/// `auth_time` derive from `now`; every other claim is fixed.
pub fn mock_token_at(now: DateTime<Utc>) -> Result<String> {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(MOCK_KEY_ID.to_string());

    let claims = json!({
        "sub": "mock_user_123",
        "name": "Jean Dupont",
        "email": "jean.dupont@mock.com",
        "preferred_username": "jdupont",
        "ver": 1,
        "iss": "https://dev-mock.oktapreview.com",
        "aud": "mock-client-id-abcde",
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
        "jti": "id.mock-jti-123",
        "amr": ["pwd", "mfa"],
        "idp": "00o00000000000000",
        "auth_time": (now - Duration::minutes(5)).timestamp(),
        "groups": ["Admins", "Users", "Developers"],
        "roles": ["read", "write"],
    });

    encode(&header, &claims, &EncodingKey::from_secret(MOCK_SIGNING_KEY))
        .map_err(|e| InspectError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::{decode_unverified, parse_id_token};
    use chrono::TimeZone;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use serde_json::Value;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn mock_token_has_three_segments() {
        let token = get_mock_token().unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn mock_token_decodes_static_claims() {
        let token = get_mock_token().unwrap();
        let (header, payload) = parse_id_token(&token).unwrap();

        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["kid"], MOCK_KEY_ID);
        assert_eq!(payload["sub"], "mock_user_123");
        assert_eq!(payload["email"], "jean.dupont@mock.com");

        let groups = payload["groups"].as_array().unwrap();
        assert!(groups.contains(&Value::from("Admins")));
    }

    #[test]
    fn mock_token_header_names_an_accepted_algorithm() {
        let token = decode_unverified(&get_mock_token().unwrap()).unwrap();
        assert!(token.is_accepted_algorithm());
    }

    #[test]
    fn mock_token_time_claims_follow_issue_time() {
        let now = fixed_now();
        let (_, payload) = parse_id_token(&mock_token_at(now).unwrap()).unwrap();

        assert_eq!(payload["iat"], now.timestamp());
        assert_eq!(payload["exp"], now.timestamp() + 3600);
        assert!(payload["auth_time"].as_i64().unwrap() < payload["iat"].as_i64().unwrap());
    }

    #[test]
    fn mock_token_keeps_array_claims_ordered() {
        let (_, payload) = parse_id_token(&mock_token_at(fixed_now()).unwrap()).unwrap();

        assert_eq!(
            payload["groups"],
            serde_json::json!(["Admins", "Users", "Developers"])
        );
        assert_eq!(payload["amr"], serde_json::json!(["pwd", "mfa"]));
        assert_eq!(payload["ver"], 1);
    }

    #[test]
    fn mock_token_is_signed_with_the_mock_key() {
        let token = mock_token_at(fixed_now()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Value>(
            &token,
            &DecodingKey::from_secret(MOCK_SIGNING_KEY),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims["sub"], "mock_user_123");
    }
}
