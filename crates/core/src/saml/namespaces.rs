//! Namespace-qualified element lookup.
//!
//! Queries are written with prefixes (`.//saml:Issuer`,
//! `saml:Subject/saml:NameID`) and resolved against an explicit
//! [`Namespaces`] map. Steps without a bound prefix match nothing: local-name
//! matching would silently pick up elements from the wrong vocabulary.

use roxmltree::{Document, Node, ParsingOptions};

pub const SAMLP: &str = "urn:oasis:names:tc:SAML:2.0:protocol";
pub const SAML: &str = "urn:oasis:names:tc:SAML:2.0:assertion";
pub const MD: &str = "urn:oasis:names:tc:SAML:2.0:metadata";
pub const DS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// Prefix to namespace URI bindings used to resolve query steps.
#[derive(Debug, Clone, Copy)]
pub struct Namespaces<'a>(&'a [(&'a str, &'a str)]);

/// SAML 2.0 protocol, assertion and XML-DSig bindings.
pub const SAML_NAMESPACES: Namespaces<'static> =
    Namespaces(&[("samlp", SAMLP), ("saml", SAML), ("ds", DS)]);

/// SAML 2.0 metadata and XML-DSig bindings.
pub const METADATA_NAMESPACES: Namespaces<'static> = Namespaces(&[("md", MD), ("ds", DS)]);

/// Parse an XML document, accepting a DOCTYPE.
///
/// Internal entities are expanded within roxmltree's limits. External
/// entities are never fetched.
pub(crate) fn parse_document(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    Document::parse_with_options(
        xml,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )
}

impl<'a> Namespaces<'a> {
    pub const fn new(bindings: &'a [(&'a str, &'a str)]) -> Self {
        Self(bindings)
    }

    pub fn resolve(&self, prefix: &str) -> Option<&'a str> {
        self.0
            .iter()
            .find(|(bound, _)| *bound == prefix)
            .map(|(_, uri)| *uri)
    }

    fn qualify<'s>(&self, step: &'s str) -> Option<(&'a str, &'s str)> {
        let (prefix, local) = step.split_once(':')?;
        self.resolve(prefix).map(|uri| (uri, local))
    }
}

/// All elements matching `path` under `context`, in document order.
///
/// A leading `.//` makes the first step match any descendant of `context`
/// (excluding `context` itself); otherwise it matches direct children. Every
/// later step matches direct children of the previous step's matches.
pub fn find_all<'a, 'input>(
    context: Node<'a, 'input>,
    path: &str,
    namespaces: Namespaces<'_>,
) -> Vec<Node<'a, 'input>> {
    let (descendant, rest) = match path.strip_prefix(".//") {
        Some(rest) => (true, rest),
        None => (false, path),
    };

    let Some(steps) = rest
        .split('/')
        .map(|step| namespaces.qualify(step))
        .collect::<Option<Vec<_>>>()
    else {
        return Vec::new();
    };

    let Some((first, others)) = steps.split_first() else {
        return Vec::new();
    };

    let mut matches: Vec<Node<'a, 'input>> = if descendant {
        context
            .descendants()
            .skip(1)
            .filter(|node| node.is_element() && node.has_tag_name(*first))
            .collect()
    } else {
        context
            .children()
            .filter(|node| node.is_element() && node.has_tag_name(*first))
            .collect()
    };

    for step in others {
        matches = matches
            .iter()
            .flat_map(|node| {
                node.children()
                    .filter(move |child| child.is_element() && child.has_tag_name(*step))
            })
            .collect();
    }

    matches
}

/// First element matching `path` under `context`.
pub fn find<'a, 'input>(
    context: Node<'a, 'input>,
    path: &str,
    namespaces: Namespaces<'_>,
) -> Option<Node<'a, 'input>> {
    find_all(context, path, namespaces).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const XML: &str = r#"<root xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
            xmlns:other="urn:example:other">
        <other:Issuer>wrong vocabulary</other:Issuer>
        <Issuer>no namespace</Issuer>
        <saml:Wrapper>
            <saml:Issuer>first</saml:Issuer>
        </saml:Wrapper>
        <saml:Issuer>second</saml:Issuer>
    </root>"#;

    #[test]
    fn resolves_bound_prefixes() {
        assert_eq!(SAML_NAMESPACES.resolve("saml"), Some(SAML));
        assert_eq!(SAML_NAMESPACES.resolve("samlp"), Some(SAMLP));
        assert_eq!(SAML_NAMESPACES.resolve("ds"), Some(DS));
        assert_eq!(SAML_NAMESPACES.resolve("xs"), None);
    }

    #[test]
    fn descendant_search_matches_namespace_not_local_name() {
        let doc = Document::parse(XML).unwrap();
        let found = find_all(doc.root_element(), ".//saml:Issuer", SAML_NAMESPACES);

        let texts: Vec<_> = found.iter().filter_map(|n| n.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn child_path_only_matches_direct_children() {
        let doc = Document::parse(XML).unwrap();
        let found = find_all(doc.root_element(), "saml:Issuer", SAML_NAMESPACES);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), Some("second"));
    }

    #[test]
    fn multi_step_path_follows_children() {
        let doc = Document::parse(XML).unwrap();
        let found = find(
            doc.root_element(),
            ".//saml:Wrapper/saml:Issuer",
            SAML_NAMESPACES,
        );

        assert_eq!(found.and_then(|n| n.text()), Some("first"));
    }

    #[test]
    fn unqualified_or_unbound_steps_match_nothing() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root_element();

        assert!(find(root, ".//Issuer", SAML_NAMESPACES).is_none());
        assert!(find(root, ".//other:Issuer", SAML_NAMESPACES).is_none());
    }

    #[test]
    fn custom_bindings_resolve_other_vocabularies() {
        let doc = Document::parse(XML).unwrap();
        let namespaces = Namespaces::new(&[("o", "urn:example:other")]);

        let found = find(doc.root_element(), ".//o:Issuer", namespaces);
        assert_eq!(found.and_then(|n| n.text()), Some("wrong vocabulary"));
    }
}
