//! XML element trees
//!
//! Every component is backed by an [`Element`]. Trees come either from
//! [`Document::parse`] or are assembled by the raw-data constructors, and are
//! serialized back with [`write_element`].

use crate::error::{Error, Result};
use crate::namespaces::{NamespaceContext, QName};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Attributes in document order
    pub attributes: Vec<(QName, String)>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element, "" when none
    pub fn namespace(&self) -> &str {
        self.qname.namespace_uri()
    }

    /// Get an attribute value by namespace and local name
    pub fn attribute(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.matches(namespace, local_name))
            .map(|(_, value)| value.as_str())
    }

    /// True if an attribute with this name is present
    pub fn has_attribute(&self, qname: &QName) -> bool {
        self.attributes.iter().any(|(name, _)| name == qname)
    }

    /// Set an attribute, replacing an existing value with the same name
    pub fn set_attribute(&mut self, qname: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(name, _)| *name == qname) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((qname, value)),
        }
    }

    /// Builder-style [`Self::set_attribute`]
    pub fn with_attribute(mut self, qname: QName, value: impl Into<String>) -> Self {
        self.set_attribute(qname, value);
        self
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Builder-style [`Self::set_text`]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Text content, or "" when none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Child elements with the given namespace and local name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.qname.matches(namespace, local_name))
    }

    /// True when the element has no attributes, text or children
    pub fn is_blank(&self) -> bool {
        self.attributes.is_empty() && self.text().trim().is_empty() && self.children.is_empty()
    }
}

/// XML Document representation
#[derive(Debug)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Read and parse an XML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Parse an XML document from bytes, resolving namespace prefixes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root = None;
        let mut element_stack: Vec<(Element, NamespaceContext)> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let scope = element_stack
                        .last()
                        .map(|(_, ctx)| ctx.clone())
                        .unwrap_or_default();
                    let (element, scope) = Self::parse_element(&e, scope)?;
                    element_stack.push((element, scope));
                }
                Ok(Event::End(_)) => {
                    if let Some((current, _)) = element_stack.pop() {
                        match element_stack.last_mut() {
                            Some((parent, _)) => parent.add_child(current),
                            None => root = Some(current),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let scope = element_stack
                        .last()
                        .map(|(_, ctx)| ctx.clone())
                        .unwrap_or_default();
                    let (element, _) = Self::parse_element(&e, scope)?;
                    match element_stack.last_mut() {
                        Some((parent, _)) => parent.add_child(element),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some((current, _)) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?;
                        append_text(current, &text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some((current, _)) = element_stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        append_text(current, &text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // comments, processing instructions, declarations
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml("Unexpected end of document".to_string()));
        }

        Ok(Self { root })
    }

    fn parse_element(
        start: &BytesStart,
        mut scope: NamespaceContext,
    ) -> Result<(Element, NamespaceContext)> {
        let mut raw_attributes = Vec::new();
        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;
            let name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .into_owned();

            if name == "xmlns" {
                scope.set_default_namespace(value);
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                scope.add_prefix(prefix, value);
            } else {
                raw_attributes.push((name, value));
            }
        }

        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();
        let mut element = Element::new(scope.resolve_element(&name)?);
        for (name, value) in raw_attributes {
            element.attributes.push((scope.resolve_attribute(&name)?, value));
        }

        Ok((element, scope))
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Take the root element, failing on an empty document
    pub fn into_root(self) -> Result<Element> {
        self.root
            .ok_or_else(|| Error::Xml("Document has no root element".to_string()))
    }
}

fn append_text(element: &mut Element, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    match element.text.as_mut() {
        Some(existing) => existing.push_str(text),
        None => element.text = Some(text.to_string()),
    }
}

/// Serialize an element tree, declaring namespaces where they first appear
pub fn write_element(element: &Element, indent: bool) -> Result<String> {
    let mut writer = if indent {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    write_node(&mut writer, element, &HashMap::new())?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Xml(format!("Serialized XML is not UTF-8: {}", e)))
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    in_scope: &HashMap<String, String>,
) -> Result<()> {
    let name = element.qname.qualified();
    let mut start = BytesStart::new(name.as_str());
    let mut scope = in_scope.clone();

    let names = std::iter::once(&element.qname).chain(element.attributes.iter().map(|(n, _)| n));
    for qname in names {
        let Some(namespace) = qname.namespace.as_deref() else {
            continue;
        };
        let prefix = qname.prefix();
        if scope.get(prefix).map(String::as_str) == Some(namespace) {
            continue;
        }
        let decl = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        start.push_attribute((decl.as_str(), namespace));
        scope.insert(prefix.to_string(), namespace.to_string());
    }

    for (qname, value) in &element.attributes {
        start.push_attribute((qname.qualified().as_str(), value.as_str()));
    }

    let map_err = |e: quick_xml::Error| Error::Xml(format!("Failed to write XML: {}", e));
    let text = element.text();
    if element.children.is_empty() && text.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(map_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(map_err)?;
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(map_err)?;
    }
    for child in &element.children {
        write_node(writer, child, &scope)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(map_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDMS5: &str = "urn:us:mil:ces:metadata:ddms:5";

    #[test]
    fn test_parse_resolves_namespaces() {
        let xml = r#"<ddms:title xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"
            xmlns:ISM="urn:us:gov:ic:ism" ISM:classification="U">Tank Survey</ddms:title>"#;
        let root = Document::from_string(xml).unwrap().into_root().unwrap();

        assert_eq!(root.local_name(), "title");
        assert_eq!(root.namespace(), DDMS5);
        assert_eq!(root.qname.prefix(), "ddms");
        assert_eq!(root.attribute("urn:us:gov:ic:ism", "classification"), Some("U"));
        assert_eq!(root.text(), "Tank Survey");
    }

    #[test]
    fn test_default_namespace_and_children() {
        let xml = r#"<boundingBox xmlns="urn:us:mil:ces:metadata:ddms:5">
            <westBL>1.0</westBL><eastBL>2.0</eastBL>
        </boundingBox>"#;
        let root = Document::from_string(xml).unwrap().into_root().unwrap();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children_named(DDMS5, "eastBL").count(), 1);
        assert_eq!(root.children[0].text(), "1.0");
    }

    #[test]
    fn test_unknown_prefix_is_an_error() {
        assert!(Document::from_string("<a:b/>").is_err());
        assert!(Document::from_string("").unwrap().into_root().is_err());
    }

    #[test]
    fn test_write_declares_namespaces_once() {
        let mut root = Element::new(QName::new(DDMS5, "ddms", "postalAddress"));
        root.add_child(Element::new(QName::new(DDMS5, "ddms", "city")).with_text("Tampa & Co"));
        let xml = write_element(&root, false).unwrap();
        assert_eq!(
            xml,
            "<ddms:postalAddress xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:5\">\
             <ddms:city>Tampa &amp; Co</ddms:city></ddms:postalAddress>"
        );
    }

    #[test]
    fn test_write_then_parse() {
        let root = Element::new(QName::new(DDMS5, "ddms", "rights"))
            .with_attribute(QName::new(DDMS5, "ddms", "privacyAct"), "true");
        let xml = write_element(&root, true).unwrap();
        let parsed = Document::from_string(&xml).unwrap().into_root().unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut element = Element::new(QName::local("a"));
        element.set_attribute(QName::local("x"), "1");
        element.set_attribute(QName::local("x"), "2");
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.attribute("", "x"), Some("2"));
        assert!(!element.is_blank());
    }
}
