//! IdP metadata: where the identity provider accepts AuthnRequests.

use serde::Serialize;

use super::namespaces::{find, find_all, parse_document, METADATA_NAMESPACES, MD};
use crate::{InspectError, Result};

pub const HTTP_REDIRECT_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";
pub const HTTP_POST_BINDING: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

/// One `SingleSignOnService` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SsoService {
    pub binding: String,
    pub location: String,
}

/// The parts of an IdP `EntityDescriptor` a service provider needs to start a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdpMetadata {
    pub entity_id: Option<String>,
    /// Endpoints in document order.
    pub sso_services: Vec<SsoService>,
    /// Base64 DER signing certificates, whitespace removed.
    pub signing_certificates: Vec<String>,
}

impl IdpMetadata {
    /// Location of the first SSO endpoint for `binding`.
    pub fn sso_location(&self, binding: &str) -> Option<&str> {
        self.sso_services
            .iter()
            .find(|service| service.binding == binding)
            .map(|service| service.location.as_str())
    }
}

/// Read IdP metadata XML.
///
/// The root may be an `EntityDescriptor` or an `EntitiesDescriptor`; the
/// first entity with an `IDPSSODescriptor` is used.
///
/// # Errors
///
/// Returns [`InspectError::MalformedXml`] if the document does not parse and
/// [`InspectError::InvalidMetadata`] if it has no IdP SSO descriptor.
pub fn parse_idp_metadata(xml: &str) -> Result<IdpMetadata> {
    let doc = parse_document(xml).map_err(|e| InspectError::MalformedXml(e.to_string()))?;
    let root = doc.root_element();

    let descriptor = if root.has_tag_name((MD, "IDPSSODescriptor")) {
        Some(root)
    } else {
        find(root, ".//md:IDPSSODescriptor", METADATA_NAMESPACES)
    }
    .ok_or_else(|| InspectError::InvalidMetadata("no IDPSSODescriptor found".to_string()))?;

    let entity_id = descriptor
        .ancestors()
        .find(|node| node.has_tag_name((MD, "EntityDescriptor")))
        .and_then(|entity| entity.attribute("entityID"))
        .map(String::from);

    let sso_services = find_all(descriptor, "md:SingleSignOnService", METADATA_NAMESPACES)
        .into_iter()
        .filter_map(|service| {
            Some(SsoService {
                binding: service.attribute("Binding")?.to_string(),
                location: service.attribute("Location")?.trim().to_string(),
            })
        })
        .collect();

    let signing_certificates = find_all(descriptor, "md:KeyDescriptor", METADATA_NAMESPACES)
        .into_iter()
        .filter(|key| key.attribute("use").is_none_or(|usage| usage == "signing"))
        .filter_map(|key| {
            find(
                key,
                ".//ds:X509Data/ds:X509Certificate",
                METADATA_NAMESPACES,
            )
        })
        .filter_map(|cert| cert.text())
        .map(compact)
        .collect();

    let metadata = IdpMetadata {
        entity_id,
        sso_services,
        signing_certificates,
    };

    tracing::debug!(
        entity_id = ?metadata.entity_id,
        endpoints = metadata.sso_services.len(),
        "Parsed IdP metadata"
    );

    Ok(metadata)
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}
