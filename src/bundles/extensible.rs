//! Extensible attributes
//!
//! Attributes from namespaces DDMS does not own (`##other`). They are kept
//! verbatim and re-emitted with their own prefixes.

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::QName;
use crate::output::LineWriter;
use crate::version::{Version, VersionInfo};
use serde_json::{Map, Value};

/// Namespaces that extensible attributes may not use
fn reserved_namespaces(info: &VersionInfo) -> Vec<&str> {
    let mut reserved = vec![
        info.ddms_namespace.as_str(),
        info.ism_namespace.as_str(),
        info.xlink_namespace.as_str(),
    ];
    if let Some(ntk) = &info.ntk_namespace {
        reserved.push(ntk.as_str());
    }
    reserved
}

fn sorted(mut attributes: Vec<(QName, String)>) -> Vec<(QName, String)> {
    attributes.sort_by(|(a, _), (b, _)| {
        (a.namespace_uri(), a.local_name.as_str()).cmp(&(b.namespace_uri(), b.local_name.as_str()))
    });
    attributes
}

/// Foreign-namespace attributes, ordered by namespace and local name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExtensibleAttributes {
    attributes: Vec<(QName, String)>,
}

impl ExtensibleAttributes {
    /// Wrap a list of qualified attributes
    pub fn new(attributes: Vec<(QName, String)>) -> Self {
        Self {
            attributes: sorted(attributes),
        }
    }

    /// Collect the attributes of an element that belong to no reserved namespace.
    /// Unqualified attributes are never extensible.
    pub fn from_element(element: &Element, version: Version) -> Self {
        let reserved = reserved_namespaces(version.info());
        let attributes = element
            .attributes
            .iter()
            .filter(|(name, _)| match name.namespace.as_deref() {
                Some(ns) => !reserved.contains(&ns),
                None => false,
            })
            .cloned()
            .collect();
        Self {
            attributes: sorted(attributes),
        }
    }

    /// True when there are no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The attributes
    pub fn attributes(&self) -> &[(QName, String)] {
        &self.attributes
    }

    /// Value of an attribute by namespace and local name
    pub fn get(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.matches(namespace, local_name))
            .map(|(_, value)| value.as_str())
    }

    /// Add the attributes to an element. Fails if one is already present.
    pub fn add_to(&self, element: &mut Element) -> Result<()> {
        for (name, value) in &self.attributes {
            if element.has_attribute(name) {
                return Err(Error::validation(format!(
                    "The extensible attribute with the name, {}, conflicts with a pre-existing attribute on the element.",
                    name.qualified()
                )));
            }
            element.attributes.push((name.clone(), value.clone()));
        }
        Ok(())
    }

    /// Every attribute must be prefixed and outside the reserved namespaces
    pub fn validate(&self, version: Version) -> Result<()> {
        let reserved = reserved_namespaces(version.info());
        for (name, _) in &self.attributes {
            let namespace = name.namespace_uri();
            if namespace.is_empty() || name.prefix().is_empty() {
                return Err(Error::validation(format!(
                    "The extensible attribute {} must have a namespace and prefix.",
                    name.local_name
                )));
            }
            if reserved.contains(&namespace) {
                return Err(Error::validation(format!(
                    "The extensible attribute {} cannot be in a reserved DDMS namespace.",
                    name.qualified()
                )));
            }
        }
        Ok(())
    }

    /// Every prefix must be bound to a single namespace on `element`.
    ///
    /// `element` is the element carrying the attributes; its own name and
    /// its other attributes count as bindings.
    pub fn check_prefixes(&self, element: &Element) -> Result<()> {
        let bindings = std::iter::once(&element.qname)
            .chain(element.attributes.iter().map(|(name, _)| name));
        for (name, _) in &self.attributes {
            let prefix = name.prefix();
            if prefix.eq_ignore_ascii_case("xml") || prefix.eq_ignore_ascii_case("xmlns") {
                return Err(Error::validation(format!(
                    "The extensible attribute {} uses a reserved prefix.",
                    name.qualified()
                )));
            }
            let clash = bindings.clone().find(|other| {
                other.namespace.is_some()
                    && other.prefix() == prefix
                    && other.namespace_uri() != name.namespace_uri()
            });
            if let Some(other) = clash {
                return Err(Error::validation(format!(
                    "The extensible attribute {} uses the prefix {}, which is already bound to {}.",
                    name.qualified(),
                    prefix,
                    other.namespace_uri()
                )));
            }
        }
        Ok(())
    }

    /// Emit one `prefix.local` line per attribute
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str) {
        for (name, value) in &self.attributes {
            writer.field(
                &format!("{}{}.{}", prefix, name.prefix(), name.local_name),
                value,
            );
        }
    }

    /// Attribute values as JSON strings keyed by `prefix:local`
    pub fn json_fields(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.qualified(), Value::String(value.clone())))
            .collect()
    }
}
