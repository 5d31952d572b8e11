//! Mock SAML Response for flows without a live IdP.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Fixed SAML Response XML served by the mock flow.
///
/// Carries scalar and multi-valued attributes so every attribute shape
/// shows up when it is parsed.
pub const MOCK_RESPONSE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="id-mock-123" InResponseTo="id-req-456" Version="2.0" IssueInstant="2024-01-01T12:00:00Z" Destination="http://localhost:8000/saml/acs">
    <saml:Issuer xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">http://www.okta.com/mock-idp</saml:Issuer>
    <samlp:Status>
        <samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/>
    </samlp:Status>
    <saml:Assertion xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="id-assertion-mock-123" IssueInstant="2024-01-01T12:00:00Z" Version="2.0">
        <saml:Issuer>http://www.okta.com/mock-idp</saml:Issuer>
        <saml:Subject>
            <saml:NameID Format="urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified">mock.user@example.com</saml:NameID>
            <saml:SubjectConfirmation Method="urn:oasis:names:tc:SAML:2.0:cm:bearer">
                <saml:SubjectConfirmationData InResponseTo="id-req-456" NotOnOrAfter="2024-01-01T12:05:00Z" Recipient="http://localhost:8000/saml/acs"/>
            </saml:SubjectConfirmation>
        </saml:Subject>
        <saml:Conditions NotBefore="2024-01-01T11:55:00Z" NotOnOrAfter="2024-01-01T12:05:00Z">
            <saml:AudienceRestriction>
                <saml:Audience>mock-audience-uri</saml:Audience>
            </saml:AudienceRestriction>
        </saml:Conditions>
        <saml:AuthnStatement AuthnInstant="2024-01-01T12:00:00Z" SessionIndex="id-session-mock-123">
            <saml:AuthnContext>
                <saml:AuthnContextClassRef>urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport</saml:AuthnContextClassRef>
            </saml:AuthnContext>
        </saml:AuthnStatement>
        <saml:AttributeStatement>
            <saml:Attribute Name="firstName" NameFormat="urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified">
                <saml:AttributeValue>Mock</saml:AttributeValue>
            </saml:Attribute>
            <saml:Attribute Name="lastName" NameFormat="urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified">
                <saml:AttributeValue>User</saml:AttributeValue>
            </saml:Attribute>
            <saml:Attribute Name="email" NameFormat="urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified">
                <saml:AttributeValue>mock.user@example.com</saml:AttributeValue>
            </saml:Attribute>
            <saml:Attribute Name="groups" NameFormat="urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified">
                <saml:AttributeValue>Admin</saml:AttributeValue>
                <saml:AttributeValue>Developer</saml:AttributeValue>
            </saml:Attribute>
        </saml:AttributeStatement>
    </saml:Assertion>
</samlp:Response>"#;

/// The mock SAML Response, base64-encoded as an IdP would POST it.
pub fn get_mock_response() -> String {
    STANDARD.encode(MOCK_RESPONSE_XML)
}
