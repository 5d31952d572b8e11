//! SAML Response inspection.
//!
//! Decodes the base64 `SAMLResponse` form field, normalizes the document into
//! a [`SamlRecord`] and pretty-prints the raw XML. No signature, audience or
//! validity window is checked. IdP metadata is read only to find where to
//! send an AuthnRequest.

mod functions;
mod metadata;
mod mock;
mod namespaces;
mod parse;
mod types;

pub use functions::{decode, format};
pub use metadata::{
    parse_idp_metadata, IdpMetadata, SsoService, HTTP_POST_BINDING, HTTP_REDIRECT_BINDING,
};
pub use mock::{get_mock_response, MOCK_RESPONSE_XML};
pub use namespaces::{Namespaces, DS, MD, METADATA_NAMESPACES, SAML, SAMLP, SAML_NAMESPACES};
pub use parse::{parse, try_parse};
pub use types::{AttributeValue, ParsedResponse, SamlRecord};
