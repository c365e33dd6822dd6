use std::collections::BTreeMap;

use dmk_core::{ModKitError, SourceLocation, SourceSpan};
use roxmltree::{Document, Node, NodeType};

#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub kind: DocumentKind,
    pub root: XmlElementNode,
}

/// The two document types the game's mod loader reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Environment,
    Scenario,
}

impl DocumentKind {
    pub fn root_tag(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Scenario => "scenario",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElementNode),
    Text(XmlTextNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementNode {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<XmlNode>,
    pub location: SourceSpan,
}

impl XmlElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &XmlElementNode> {
        self.children.iter().filter_map(|entry| match entry {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn find_child(&self, name: &str) -> Option<&XmlElementNode> {
        self.element_children().find(|child| child.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlTextNode {
    pub value: String,
    pub location: SourceSpan,
}

/// Importer gate: the UI keeps the import action disabled until the pasted
/// text passes this check, so a forward transform never runs on a document
/// that could be partially applied.
pub fn validate_document(source: &str) -> Result<DocumentKind, ModKitError> {
    let document = parse_mod_document(source)?;
    Ok(document.kind)
}

pub fn parse_mod_document(source: &str) -> Result<XmlDocument, ModKitError> {
    let root = parse_xml_root(source)?;
    let kind = match root.name.as_str() {
        "environment" => DocumentKind::Environment,
        "scenario" => DocumentKind::Scenario,
        other => {
            return Err(ModKitError::with_span(
                "XML_ROOT_INVALID",
                format!(
                    "Expected <environment> or <scenario> root, got <{}>.",
                    other
                ),
                root.location.clone(),
            ))
        }
    };
    Ok(XmlDocument { kind, root })
}

pub fn parse_xml_root(source: &str) -> Result<XmlElementNode, ModKitError> {
    let document = Document::parse(source)
        .map_err(|error| ModKitError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(ModKitError::new(
            "XML_PARSE_ERROR",
            "XML document must contain a root element.",
        ));
    };

    Ok(parse_element(&document, root))
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> XmlElementNode {
    let mut attributes = BTreeMap::new();
    for attribute in node.attributes() {
        attributes.insert(attribute.name().to_string(), attribute.value().to_string());
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(XmlNode::Element(parse_element(document, child))),
            NodeType::Text => {
                let value = child.text().unwrap_or_default().to_string();
                if value.trim().is_empty() {
                    continue;
                }
                children.push(XmlNode::Text(XmlTextNode {
                    value,
                    location: node_span(document, child.range().start, child.range().end),
                }));
            }
            _ => {}
        }
    }

    XmlElementNode {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
        location: node_span(document, node.range().start, node.range().end),
    }
}

fn node_span(document: &Document<'_>, start: usize, end: usize) -> SourceSpan {
    let start_pos = document.text_pos_at(start);
    let end_pos = document.text_pos_at(end);
    SourceSpan {
        start: SourceLocation {
            line: start_pos.row as usize,
            column: start_pos.col as usize,
        },
        end: SourceLocation {
            line: end_pos.row as usize,
            column: end_pos.col as usize,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mod_document_detects_environment_root() {
        let source = r#"<environment id="eurasia"><seasons/></environment>"#;
        let document = parse_mod_document(source).expect("xml should parse");
        assert_eq!(document.kind, DocumentKind::Environment);
        assert_eq!(document.root.attr("id"), Some("eurasia"));
    }

    #[test]
    fn parse_mod_document_detects_scenario_root() {
        let source = r#"<scenario><goals/></scenario>"#;
        let document = parse_mod_document(source).expect("xml should parse");
        assert_eq!(document.kind, DocumentKind::Scenario);
    }

    #[test]
    fn parse_mod_document_rejects_unknown_root() {
        let error = parse_mod_document("<mod/>").expect_err("unknown root should fail");
        assert_eq!(error.code, "XML_ROOT_INVALID");
        assert!(error.span.is_some());
    }

    #[test]
    fn validate_document_rejects_unclosed_tag() {
        let error = validate_document("<scenario>").expect_err("invalid xml should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }

    #[test]
    fn validate_document_rejects_element_less_document() {
        let error = validate_document("<?xml version=\"1.0\"?><!---->")
            .expect_err("missing root element should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }

    #[test]
    fn parse_element_keeps_repeated_children_in_document_order() {
        let source = r#"
<scenario>
  <locations>
    <location id="first"/>
    <location id="second"/>
  </locations>
</scenario>
"#;
        let document = parse_mod_document(source).expect("xml should parse");
        let locations = document
            .root
            .find_child("locations")
            .expect("locations element");
        let ids = locations
            .element_children()
            .filter_map(|child| child.attr("id"))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn parse_element_skips_comments_and_whitespace_text() {
        let source = "<scenario><!-- note -->\n  <goals/>\n</scenario>";
        let document = parse_mod_document(source).expect("xml should parse");
        assert_eq!(document.root.children.len(), 1);
        assert!(document.root.find_child("goals").is_some());
    }
}
