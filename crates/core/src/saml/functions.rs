use base64::{engine::general_purpose::STANDARD, Engine};
use quick_xml::{events::Event, Reader, Writer};

use super::namespaces::parse_document;
use crate::{InspectError, Result};

/// Decode a base64 `SAMLResponse` into its XML text.
///
/// Whitespace is ignored, since form posts and pasted values often wrap
/// the encoded payload across lines.
///
/// # Errors
///
/// Returns [`InspectError::Decode`] if the input is not standard base64 or
/// the decoded bytes are not UTF-8.
pub fn decode(saml_response: &str) -> Result<String> {
    let compact: String = saml_response
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| InspectError::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| InspectError::Decode(e.to_string()))
}

/// Re-indent XML for display.
///
/// Best effort: anything that is not well-formed XML comes back unchanged.
pub fn format(xml: &str) -> String {
    match reindent(xml) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::debug!(error = %e, "Returning XML unformatted");
            xml.to_string()
        }
    }
}

fn reindent(xml: &str) -> Result<String> {
    // quick-xml streams without checking the document is complete.
    parse_document(xml).map_err(malformed)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Eof => break,
            event => writer.write_event(event).map_err(malformed)?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(malformed)
}

fn malformed(e: impl std::fmt::Display) -> InspectError {
    InspectError::MalformedXml(e.to_string())
}
