//! ddms:keyword

use crate::bundles::{
    BundleKind, Bundles, ExtensibleAttributes, SecurityAttributes, SecurityAttributesBuilder,
};
use crate::component::{
    is_blank, Builder, BundleRule, Component, ElementDescriptor, FieldDescriptor, FieldKind,
    Parts,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[FieldDescriptor::attribute("value", FieldKind::Text).required()];

static BUNDLES: &[BundleRule] = &[
    BundleRule::optional(BundleKind::Extensible).since(Version::V3_0),
    BundleRule::optional(BundleKind::Security).since(Version::V4_0_1),
];

/// Descriptor for `ddms:keyword`
pub static KEYWORD: ElementDescriptor = ElementDescriptor {
    name: "keyword",
    fields: FIELDS,
    children: &[],
    bundles: BUNDLES,
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// A free-text subject keyword
    Keyword,
    KEYWORD
);

impl Keyword {
    /// Build from the keyword text and optional attribute bundles
    pub fn new(
        version: Version,
        value: &str,
        security: Option<SecurityAttributes>,
        extensible: Option<ExtensibleAttributes>,
    ) -> Result<Self> {
        let parts = Parts::new().value("value", value).bundles(
            Bundles::new()
                .with_security(security)
                .with_extensible(extensible),
        );
        Component::from_parts(&KEYWORD, version, parts).map(Self)
    }

    /// The keyword text
    pub fn value(&self) -> &str {
        self.0.value("value").unwrap_or_default()
    }

    /// Security markings
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.0.security_attributes()
    }

    /// Custom attributes
    pub fn extensible_attributes(&self) -> Option<&ExtensibleAttributes> {
        self.0.extensible_attributes()
    }
}

/// Builder for [`Keyword`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordBuilder {
    /// The keyword text
    pub value: Option<String>,
    /// Security markings
    pub security: SecurityAttributesBuilder,
    /// Custom attributes, carried as-is
    pub extensible: Option<ExtensibleAttributes>,
}

impl Builder for KeywordBuilder {
    type Target = Keyword;

    fn is_empty(&self) -> bool {
        is_blank(&self.value)
            && self.security.is_empty()
            && self.extensible.as_ref().map_or(true, ExtensibleAttributes::is_empty)
    }

    fn commit(&self, version: Version) -> Result<Option<Keyword>> {
        if self.is_empty() {
            return Ok(None);
        }
        let security = self.security.commit(version)?;
        let parts = Parts::new().value_opt("value", self.value.clone()).bundles(
            Bundles::new()
                .with_security(Some(security))
                .with_extensible(self.extensible.clone()),
        );
        Component::from_parts(&KEYWORD, version, parts)
            .map(Keyword)
            .map(Some)
    }
}

impl From<&Keyword> for KeywordBuilder {
    fn from(keyword: &Keyword) -> Self {
        Self {
            value: Some(keyword.value().to_string()),
            security: keyword
                .security_attributes()
                .map(SecurityAttributesBuilder::from)
                .unwrap_or_default(),
            extensible: keyword.extensible_attributes().cloned(),
        }
    }
}
