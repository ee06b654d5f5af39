//! Attribute bundles
//!
//! Groups of attributes that many DDMS elements share. A component holds at
//! most one bundle of each [`BundleKind`]; empty bundles are not stored.

pub mod extensible;
pub mod security;
pub mod srs;
pub mod xlink;

pub use extensible::ExtensibleAttributes;
pub use security::{SecurityAttributes, SecurityAttributesBuilder};
pub use srs::{SrsAttributes, SrsAttributesBuilder};
pub use xlink::{XLinkAttributes, XLinkAttributesBuilder};

use crate::documents::Element;
use crate::error::Result;
use crate::output::LineWriter;
use crate::version::Version;
use serde_json::{Map, Value};
use std::fmt;

/// The kinds of attribute bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleKind {
    /// ISM security attributes
    Security,
    /// XLink attributes
    XLink,
    /// Attributes from foreign namespaces
    Extensible,
    /// Unqualified spatial reference system attributes
    Srs,
}

impl BundleKind {
    /// Name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleKind::Security => "Security",
            BundleKind::XLink => "XLink",
            BundleKind::Extensible => "Extensible",
            BundleKind::Srs => "SRS",
        }
    }

    /// Key of the nested object in JSON output
    pub fn json_key(&self) -> &'static str {
        match self {
            BundleKind::Security => "securityAttributes",
            BundleKind::XLink => "xlinkAttributes",
            BundleKind::Extensible => "extensibleAttributes",
            BundleKind::Srs => "srsAttributes",
        }
    }
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The bundles attached to one component
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bundles {
    /// Security attributes
    pub security: Option<SecurityAttributes>,
    /// XLink attributes
    pub xlink: Option<XLinkAttributes>,
    /// Extensible attributes
    pub extensible: Option<ExtensibleAttributes>,
    /// SRS attributes
    pub srs: Option<SrsAttributes>,
}

impl Bundles {
    /// No bundles
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach security attributes. Empty bundles are dropped.
    pub fn with_security(mut self, security: Option<SecurityAttributes>) -> Self {
        self.security = security.filter(|s| !s.is_empty());
        self
    }

    /// Attach xlink attributes. Empty bundles are dropped.
    pub fn with_xlink(mut self, xlink: Option<XLinkAttributes>) -> Self {
        self.xlink = xlink.filter(|x| !x.is_empty());
        self
    }

    /// Attach extensible attributes. Empty bundles are dropped.
    pub fn with_extensible(mut self, extensible: Option<ExtensibleAttributes>) -> Self {
        self.extensible = extensible.filter(|e| !e.is_empty());
        self
    }

    /// Attach SRS attributes. Empty bundles are dropped.
    pub fn with_srs(mut self, srs: Option<SrsAttributes>) -> Self {
        self.srs = srs.filter(|s| !s.is_empty());
        self
    }

    /// Read the bundles of the given kinds from an element
    pub fn from_element(element: &Element, version: Version, kinds: &[BundleKind]) -> Self {
        let mut bundles = Bundles::new();
        for kind in kinds {
            match kind {
                BundleKind::Security => {
                    bundles = bundles.with_security(Some(SecurityAttributes::from_element(
                        element, version,
                    )))
                }
                BundleKind::XLink => {
                    bundles =
                        bundles.with_xlink(Some(XLinkAttributes::from_element(element, version)))
                }
                BundleKind::Extensible => {
                    bundles = bundles.with_extensible(Some(ExtensibleAttributes::from_element(
                        element, version,
                    )))
                }
                BundleKind::Srs => {
                    bundles = bundles.with_srs(Some(SrsAttributes::from_element(element)))
                }
            }
        }
        bundles
    }

    /// Write every bundle onto an element
    pub fn add_to(&self, element: &mut Element, version: Version) -> Result<()> {
        if let Some(security) = &self.security {
            security.add_to(element, version);
        }
        if let Some(xlink) = &self.xlink {
            xlink.add_to(element, version);
        }
        if let Some(srs) = &self.srs {
            srs.add_to(element);
        }
        if let Some(extensible) = &self.extensible {
            extensible.add_to(element)?;
        }
        Ok(())
    }

    /// Kinds that are present
    pub fn kinds(&self) -> Vec<BundleKind> {
        let mut kinds = Vec::new();
        if self.security.is_some() {
            kinds.push(BundleKind::Security);
        }
        if self.xlink.is_some() {
            kinds.push(BundleKind::XLink);
        }
        if self.extensible.is_some() {
            kinds.push(BundleKind::Extensible);
        }
        if self.srs.is_some() {
            kinds.push(BundleKind::Srs);
        }
        kinds
    }

    /// True when no bundle is attached
    pub fn is_empty(&self) -> bool {
        self.security.is_none()
            && self.xlink.is_none()
            && self.extensible.is_none()
            && self.srs.is_none()
    }

    /// Run each bundle's own checks against a version
    pub fn validate(&self, version: Version) -> Result<()> {
        if let Some(security) = &self.security {
            security.validate(version)?;
        }
        if let Some(xlink) = &self.xlink {
            xlink.validate(version)?;
        }
        if let Some(extensible) = &self.extensible {
            extensible.validate(version)?;
        }
        if let Some(srs) = &self.srs {
            srs.validate()?;
        }
        Ok(())
    }

    /// Emit HTML/Text lines for every bundle under `prefix`
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str) {
        if let Some(srs) = &self.srs {
            srs.write_lines(writer, prefix);
        }
        if let Some(xlink) = &self.xlink {
            xlink.write_lines(writer, prefix);
        }
        if let Some(extensible) = &self.extensible {
            extensible.write_lines(writer, prefix);
        }
        if let Some(security) = &self.security {
            security.write_lines(writer, prefix);
        }
    }

    /// Add bundle entries to a JSON object, inline or nested per kind
    pub fn write_json(&self, object: &mut Map<String, Value>, inline: bool) {
        let mut put = |kind: BundleKind, fields: Map<String, Value>| {
            if inline {
                object.extend(fields);
            } else {
                object.insert(kind.json_key().to_string(), Value::Object(fields));
            }
        };
        if let Some(srs) = &self.srs {
            put(BundleKind::Srs, srs.json_fields());
        }
        if let Some(xlink) = &self.xlink {
            put(BundleKind::XLink, xlink.json_fields());
        }
        if let Some(extensible) = &self.extensible {
            put(BundleKind::Extensible, extensible.json_fields());
        }
        if let Some(security) = &self.security {
            put(BundleKind::Security, security.json_fields());
        }
    }
}

/// Collapse runs of whitespace in a token list
pub(crate) fn normalize_tokens(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
