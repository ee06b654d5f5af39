//! ddms:title

use crate::bundles::{BundleKind, Bundles, SecurityAttributes, SecurityAttributesBuilder};
use crate::component::{
    is_blank, Builder, BundleRequirement, BundleRule, Component, ElementDescriptor,
    FieldDescriptor, Parts,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text("title").required()];

static BUNDLES: &[BundleRule] = &[BundleRule::requiring(
    BundleKind::Security,
    BundleRequirement::Classified,
)];

/// Descriptor for `ddms:title`
pub static TITLE: ElementDescriptor = ElementDescriptor {
    name: "title",
    fields: FIELDS,
    children: &[],
    bundles: BUNDLES,
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// The name of a resource, always classified
    Title,
    TITLE
);

impl Title {
    /// Build from the title text and its security markings
    pub fn new(version: Version, title: &str, security: SecurityAttributes) -> Result<Self> {
        let parts = Parts::new()
            .value("title", title)
            .bundles(Bundles::new().with_security(Some(security)));
        Component::from_parts(&TITLE, version, parts).map(Self)
    }

    /// The title text
    pub fn title(&self) -> &str {
        self.0.value("title").unwrap_or_default()
    }

    /// Security markings
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.0.security_attributes()
    }
}

/// Builder for [`Title`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBuilder {
    /// The title text
    pub title: Option<String>,
    /// Security markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for TitleBuilder {
    type Target = Title;

    fn is_empty(&self) -> bool {
        is_blank(&self.title) && self.security.is_empty()
    }

    fn commit(&self, version: Version) -> Result<Option<Title>> {
        if self.is_empty() {
            return Ok(None);
        }
        let security = self.security.commit(version)?;
        let parts = Parts::new()
            .value_opt("title", self.title.clone())
            .bundles(Bundles::new().with_security(Some(security)));
        Component::from_parts(&TITLE, version, parts)
            .map(Title)
            .map(Some)
    }
}

impl From<&Title> for TitleBuilder {
    fn from(title: &Title) -> Self {
        Self {
            title: Some(title.title().to_string()),
            security: title
                .security_attributes()
                .map(SecurityAttributesBuilder::from)
                .unwrap_or_default(),
        }
    }
}
