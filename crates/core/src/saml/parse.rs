use roxmltree::Node;

use super::namespaces::{find, find_all, parse_document, SAML_NAMESPACES};
use super::{AttributeValue, ParsedResponse, SamlRecord};
use crate::{InspectError, Result};

/// Parse SAML Response XML for display.
///
/// Any failure to parse the document is reported inside the returned value
/// so the caller can still render the raw input. See [`try_parse`] for the
/// lookup rules.
pub fn parse(xml: &str) -> ParsedResponse {
    let outcome = ParsedResponse::from(try_parse(xml));

    if let Some(error) = outcome.error() {
        tracing::debug!(%error, "SAML Response did not parse");
    }

    outcome
}

/// Parse SAML Response XML into a [`SamlRecord`].
///
/// Each field comes from the first namespace-qualified match in document
/// order:
/// - `status_code`: `Value` of `.//samlp:StatusCode`
/// - `issuer`: text of `.//saml:Issuer`, Response or Assertion level
/// - `name_id` and `attributes`: from the first `.//saml:Assertion`
/// - `destination`, `id`, `in_response_to`, `issue_instant`: root attributes
///
/// Missing elements leave their field empty.
///
/// # Errors
///
/// Returns [`InspectError::MalformedXml`] only when the document itself does
/// not parse.
pub fn try_parse(xml: &str) -> Result<SamlRecord> {
    let doc = parse_document(xml).map_err(|e| InspectError::MalformedXml(e.to_string()))?;
    let root = doc.root_element();

    let mut record = SamlRecord {
        destination: root_attribute(root, "Destination"),
        id: root_attribute(root, "ID"),
        in_response_to: root_attribute(root, "InResponseTo"),
        issue_instant: root_attribute(root, "IssueInstant"),
        ..SamlRecord::default()
    };

    record.status_code = find(root, ".//samlp:StatusCode", SAML_NAMESPACES)
        .and_then(|node| node.attribute("Value"))
        .map(String::from);

    record.issuer = find(root, ".//saml:Issuer", SAML_NAMESPACES)
        .and_then(|node| node.text())
        .map(String::from);

    if let Some(assertion) = find(root, ".//saml:Assertion", SAML_NAMESPACES) {
        record.name_id = find(assertion, ".//saml:Subject/saml:NameID", SAML_NAMESPACES)
            .and_then(|node| node.text())
            .map(String::from);

        for attribute in find_all(
            assertion,
            ".//saml:AttributeStatement/saml:Attribute",
            SAML_NAMESPACES,
        ) {
            let Some(name) = attribute.attribute("Name") else {
                continue;
            };
            record
                .attributes
                .insert(name.to_string(), attribute_value(attribute));
        }
    }

    tracing::debug!(
        issuer = ?record.issuer,
        status = ?record.status_code,
        attributes = record.attributes.len(),
        "Parsed SAML Response"
    );

    Ok(record)
}

fn root_attribute(root: Node<'_, '_>, name: &str) -> Option<String> {
    root.attribute(name).map(String::from)
}

/// Values with no text are dropped; the rest are trimmed.
fn attribute_value(attribute: Node<'_, '_>) -> AttributeValue {
    let values = find_all(attribute, "saml:AttributeValue", SAML_NAMESPACES)
        .into_iter()
        .filter_map(|value| value.text())
        .map(|text| text.trim().to_string())
        .collect();

    AttributeValue::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saml::{decode, format, get_mock_response};

    fn mock_record() -> SamlRecord {
        let xml = decode(&get_mock_response()).unwrap();
        try_parse(&xml).unwrap()
    }

    fn response_with_attributes(attributes: &str) -> String {
        format!(
            r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
                    xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">
                <saml:Assertion>
                    <saml:AttributeStatement>{attributes}</saml:AttributeStatement>
                </saml:Assertion>
            </samlp:Response>"#
        )
    }

    #[test]
    fn mock_response_yields_expected_record() {
        let record = mock_record();

        assert_eq!(record.issuer.as_deref(), Some("http://www.okta.com/mock-idp"));
        assert_eq!(record.name_id.as_deref(), Some("mock.user@example.com"));
        assert_eq!(
            record.attributes["firstName"],
            AttributeValue::Single("Mock".to_string())
        );

        let groups = &record.attributes["groups"];
        assert!(matches!(groups, AttributeValue::Multiple(_)));
        assert!(groups.contains("Admin"));
        assert!(groups.contains("Developer"));
    }

    #[test]
    fn mock_response_root_attributes_pass_through() {
        let record = mock_record();

        assert_eq!(
            record.status_code.as_deref(),
            Some("urn:oasis:names:tc:SAML:2.0:status:Success")
        );
        assert_eq!(record.id.as_deref(), Some("id-mock-123"));
        assert_eq!(record.in_response_to.as_deref(), Some("id-req-456"));
        assert_eq!(record.issue_instant.as_deref(), Some("2024-01-01T12:00:00Z"));
        assert_eq!(
            record.destination.as_deref(),
            Some("http://localhost:8000/saml/acs")
        );
    }

    #[test]
    fn attribute_without_values_is_null_not_missing() {
        let xml = response_with_attributes(r#"<saml:Attribute Name="empty"/>"#);
        let record = try_parse(&xml).unwrap();

        assert_eq!(record.attributes.get("empty"), Some(&AttributeValue::Absent));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["attributes"].as_object().unwrap().contains_key("empty"));
        assert!(json["attributes"]["empty"].is_null());
    }

    #[test]
    fn single_value_is_scalar_and_trimmed() {
        let xml = response_with_attributes(
            r#"<saml:Attribute Name="email">
                <saml:AttributeValue>
                    user@example.com
                </saml:AttributeValue>
            </saml:Attribute>"#,
        );
        let record = try_parse(&xml).unwrap();

        assert_eq!(
            record.attributes["email"],
            AttributeValue::Single("user@example.com".to_string())
        );
    }

    #[test]
    fn empty_attribute_values_are_dropped() {
        let xml = response_with_attributes(
            r#"<saml:Attribute Name="role">
                <saml:AttributeValue/>
                <saml:AttributeValue>admin</saml:AttributeValue>
            </saml:Attribute>"#,
        );
        let record = try_parse(&xml).unwrap();

        assert_eq!(
            record.attributes["role"],
            AttributeValue::Single("admin".to_string())
        );
    }

    #[test]
    fn attribute_values_in_other_namespaces_are_ignored() {
        let xml = response_with_attributes(
            r#"<saml:Attribute Name="team">
                <AttributeValue>unqualified</AttributeValue>
                <saml:AttributeValue>core</saml:AttributeValue>
            </saml:Attribute>"#,
        );
        let record = try_parse(&xml).unwrap();

        assert_eq!(
            record.attributes["team"],
            AttributeValue::Single("core".to_string())
        );
    }

    #[test]
    fn unqualified_elements_are_not_found() {
        let xml = r#"<Response><Issuer>plain</Issuer><Assertion><Subject><NameID>x</NameID></Subject></Assertion></Response>"#;
        let record = try_parse(xml).unwrap();

        assert_eq!(record, SamlRecord::default());
    }

    #[test]
    fn issuer_falls_back_to_assertion_level() {
        let xml = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
                xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="r1">
            <saml:Assertion>
                <saml:Issuer>https://idp.example.com</saml:Issuer>
            </saml:Assertion>
        </samlp:Response>"#;
        let record = try_parse(xml).unwrap();

        assert_eq!(record.issuer.as_deref(), Some("https://idp.example.com"));
        assert_eq!(record.id.as_deref(), Some("r1"));
        assert!(record.name_id.is_none());
        assert!(record.status_code.is_none());
        assert!(record.destination.is_none());
    }

    #[test]
    fn response_without_assertion_has_no_subject_or_attributes() {
        let xml = r#"<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol">
            <samlp:Status>
                <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Requester"/>
            </samlp:Status>
        </samlp:Response>"#;
        let record = try_parse(xml).unwrap();

        assert_eq!(
            record.status_code.as_deref(),
            Some("urn:oasis:names:tc:SAML:2.0:status:Requester")
        );
        assert!(record.name_id.is_none());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn attributes_without_name_are_skipped() {
        let xml = response_with_attributes(
            r#"<saml:Attribute><saml:AttributeValue>x</saml:AttributeValue></saml:Attribute>"#,
        );
        let record = try_parse(&xml).unwrap();

        assert!(record.attributes.is_empty());
    }

    #[test]
    fn malformed_xml_is_reported_as_data() {
        let outcome = parse("<samlp:Response><unclosed>");

        let error = outcome.error().unwrap();
        assert!(error.starts_with("failed to parse XML"));

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["error"].is_string());
    }

    #[test]
    fn response_with_doctype_is_parsed() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE samlp:Response>
<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="r1"><saml:Issuer>idp</saml:Issuer></samlp:Response>"#;

        let outcome = parse(xml);
        let record = outcome.record().unwrap();

        assert_eq!(record.issuer.as_deref(), Some("idp"));
        assert_eq!(record.id.as_deref(), Some("r1"));
    }

    #[test]
    fn internal_entities_are_expanded() {
        let xml = r#"<!DOCTYPE samlp:Response [<!ENTITY idp "https://idp.example.com">]>
<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
        xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"><saml:Issuer>&idp;</saml:Issuer></samlp:Response>"#;

        let record = try_parse(xml).unwrap();
        assert_eq!(record.issuer.as_deref(), Some("https://idp.example.com"));
    }

    #[test]
    fn attributes_keep_document_order() {
        let xml = response_with_attributes(
            r#"<saml:Attribute Name="zeta"><saml:AttributeValue>1</saml:AttributeValue></saml:Attribute>
            <saml:Attribute Name="alpha"><saml:AttributeValue>2</saml:AttributeValue></saml:Attribute>
            <saml:Attribute Name="mid"/>
            <saml:Attribute Name="zeta"><saml:AttributeValue>3</saml:AttributeValue></saml:Attribute>"#,
        );
        let record = try_parse(&xml).unwrap();

        let names: Vec<_> = record.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(record.attributes["zeta"], AttributeValue::Single("3".to_string()));

        let json = serde_json::to_string(&record.attributes).unwrap();
        assert_eq!(json, r#"{"zeta":"3","alpha":"2","mid":null}"#);
    }

    #[test]
    fn formatted_xml_parses_to_the_same_record() {
        let xml = decode(&get_mock_response()).unwrap();
        assert_eq!(try_parse(&format(&xml)).unwrap(), mock_record());
    }
}
