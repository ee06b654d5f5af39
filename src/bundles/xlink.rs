//! XLink attributes
//!
//! Used by `ddms:link` (as a locator) and by later DDMS elements that point
//! at external resources (as simple links).

use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::is_valid_ncname;
use crate::namespaces::QName;
use crate::output::LineWriter;
use crate::version::{Version, VersionRegistry};
use serde_json::{Map, Value};

/// Allowed values of `xlink:type`
pub const LINK_TYPES: &[&str] = &["simple", "locator"];

static NAMES: [&str; 5] = ["type", "href", "role", "title", "label"];

/// XLink attributes in a fixed order: type, href, role, title, label
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XLinkAttributes {
    values: [Option<String>; 5],
}

fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl XLinkAttributes {
    /// Build from raw values; blank values count as unset
    pub fn new(
        link_type: Option<&str>,
        href: Option<&str>,
        role: Option<&str>,
        title: Option<&str>,
        label: Option<&str>,
    ) -> Self {
        Self {
            values: [
                clean(link_type),
                clean(href),
                clean(role),
                clean(title),
                clean(label),
            ],
        }
    }

    /// A locator link, the form `ddms:link` requires
    pub fn locator(href: &str, role: Option<&str>, title: Option<&str>, label: Option<&str>) -> Self {
        Self::new(Some("locator"), Some(href), role, title, label)
    }

    /// Read the xlink attributes of an element
    pub fn from_element(element: &Element, version: Version) -> Self {
        let namespace = &version.info().xlink_namespace;
        let read = |name: &str| element.attribute(namespace, name);
        Self::new(read("type"), read("href"), read("role"), read("title"), read("label"))
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    fn value(&self, index: usize) -> Option<&str> {
        self.values[index].as_deref()
    }

    /// `xlink:type`
    pub fn link_type(&self) -> Option<&str> {
        self.value(0)
    }

    /// `xlink:href`
    pub fn href(&self) -> Option<&str> {
        self.value(1)
    }

    /// `xlink:role`
    pub fn role(&self) -> Option<&str> {
        self.value(2)
    }

    /// `xlink:title`
    pub fn title(&self) -> Option<&str> {
        self.value(3)
    }

    /// `xlink:label`
    pub fn label(&self) -> Option<&str> {
        self.value(4)
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        NAMES
            .iter()
            .zip(self.values.iter())
            .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
    }

    /// Write the attributes onto an element
    pub fn add_to(&self, element: &mut Element, version: Version) {
        let namespace = &version.info().xlink_namespace;
        let prefix = &VersionRegistry::global().prefixes().xlink;
        for (name, value) in self.iter() {
            element.set_attribute(QName::new(namespace, prefix, name), value);
        }
    }

    /// Check the attribute values. Role and label are only checked from DDMS 4.0.1.
    pub fn validate(&self, version: Version) -> Result<()> {
        if let Some(link_type) = self.link_type() {
            if !LINK_TYPES.contains(&link_type) {
                return Err(Error::validation(format!(
                    "The type attribute must be one of {}.",
                    LINK_TYPES.join(", ")
                )));
            }
        }
        if let Some(href) = self.href() {
            if !is_valid_uri(href) {
                return Err(Error::validation(format!("Invalid URI (href): {}", href)));
            }
        }
        if version.is_at_least(Version::V4_0_1) {
            if let Some(role) = self.role() {
                if !is_valid_uri(role) {
                    return Err(Error::validation(format!("Invalid URI (role): {}", role)));
                }
            }
            if let Some(label) = self.label() {
                if !is_valid_ncname(label) {
                    return Err(Error::validation(format!(
                        "The label attribute must be an NCName: {}",
                        label
                    )));
                }
            }
        }
        Ok(())
    }

    /// Require a locator with an href
    pub fn require_locator(&self) -> Result<()> {
        if self.link_type() != Some("locator") {
            return Err(Error::validation(
                "The type attribute must have a fixed value of \"locator\".",
            ));
        }
        if self.href().is_none() {
            return Err(Error::validation("href is required."));
        }
        Ok(())
    }

    /// Emit one line per attribute
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str) {
        for (name, value) in self.iter() {
            writer.field(&format!("{}{}", prefix, name), value);
        }
    }

    /// Attribute values as JSON strings
    pub fn json_fields(&self) -> Map<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect()
    }
}

/// Mutable form of [`XLinkAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XLinkAttributesBuilder {
    /// `xlink:type`
    pub link_type: Option<String>,
    /// `xlink:href`
    pub href: Option<String>,
    /// `xlink:role`
    pub role: Option<String>,
    /// `xlink:title`
    pub title: Option<String>,
    /// `xlink:label`
    pub label: Option<String>,
}

impl XLinkAttributesBuilder {
    /// True when nothing has been set
    pub fn is_empty(&self) -> bool {
        self.preview().is_empty()
    }

    fn preview(&self) -> XLinkAttributes {
        XLinkAttributes::new(
            self.link_type.as_deref(),
            self.href.as_deref(),
            self.role.as_deref(),
            self.title.as_deref(),
            self.label.as_deref(),
        )
    }

    /// Build the (possibly empty) bundle, checked against `version`
    pub fn commit(&self, version: Version) -> Result<XLinkAttributes> {
        let attributes = self.preview();
        attributes.validate(version)?;
        Ok(attributes)
    }
}

impl From<&XLinkAttributes> for XLinkAttributesBuilder {
    fn from(attributes: &XLinkAttributes) -> Self {
        Self {
            link_type: attributes.link_type().map(str::to_string),
            href: attributes.href().map(str::to_string),
            role: attributes.role().map(str::to_string),
            title: attributes.title().map(str::to_string),
            label: attributes.label().map(str::to_string),
        }
    }
}
