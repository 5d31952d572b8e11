pub mod health;
pub mod inspect;
pub mod oidc;
pub mod pages;
pub mod saml;

use serde::Serialize;

/// Render `value` as indented JSON for display.
fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
