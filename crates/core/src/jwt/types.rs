use jsonwebtoken::Algorithm;
use serde::Serialize;
use serde_json::{Map, Value};

/// Signing algorithms a header may name and still count as a recognized ID token.
///
/// The list is informational: the named algorithm is read, never verified.
pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::RS256, Algorithm::ES256];

/// A JSON object from a token segment, keys and value types kept verbatim.
pub type Claims = Map<String, Value>;

/// A JWT split into its parts without any verification.
///
/// The header and payload are exactly what the token carries. The signature
/// has not been checked against any key, and `exp`, `nbf` and `aud` have not
/// been enforced. Nothing in this value is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnverifiedToken {
    pub header: Claims,
    pub payload: Claims,
    /// Raw base64url signature segment.
    pub signature: String,
}

impl UnverifiedToken {
    /// The `alg` named in the header, if it is a string.
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Whether the header names one of [`ACCEPTED_ALGORITHMS`].
    pub fn is_accepted_algorithm(&self) -> bool {
        self.algorithm()
            .and_then(|alg| alg.parse::<Algorithm>().ok())
            .is_some_and(|alg| ACCEPTED_ALGORITHMS.contains(&alg))
    }

    pub fn into_parts(self) -> (Claims, Claims) {
        (self.header, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with_header(header: Value) -> UnverifiedToken {
        UnverifiedToken {
            header: header.as_object().cloned().unwrap(),
            payload: Claims::new(),
            signature: String::new(),
        }
    }

    #[test]
    fn algorithm_reads_alg_header() {
        let token = token_with_header(json!({ "alg": "RS256", "kid": "abc" }));
        assert_eq!(token.algorithm(), Some("RS256"));
    }

    #[test]
    fn accepted_algorithms_are_recognized() {
        for alg in ["HS256", "RS256", "ES256"] {
            let token = token_with_header(json!({ "alg": alg }));
            assert!(token.is_accepted_algorithm(), "{alg} should be accepted");
        }
    }

    #[test]
    fn other_algorithms_are_not_accepted() {
        for header in [
            json!({ "alg": "none" }),
            json!({ "alg": "PS512" }),
            json!({ "alg": 256 }),
            json!({}),
        ] {
            assert!(!token_with_header(header).is_accepted_algorithm());
        }
    }
}
