//! ddms:description

use crate::bundles::{BundleKind, Bundles, SecurityAttributes, SecurityAttributesBuilder};
use crate::component::{
    is_blank, Builder, BundleRequirement, BundleRule, Component, ElementDescriptor,
    FieldDescriptor, Parts, WarningRule,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[FieldDescriptor::text("description")];

static BUNDLES: &[BundleRule] = &[BundleRule::requiring(
    BundleKind::Security,
    BundleRequirement::Classified,
)];

/// Descriptor for `ddms:description`
pub static DESCRIPTION: ElementDescriptor = ElementDescriptor {
    name: "description",
    fields: FIELDS,
    children: &[],
    bundles: BUNDLES,
    warnings: &[WarningRule::NoValue("description")],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// A free-text summary of a resource
    Description,
    DESCRIPTION
);

impl Description {
    /// Build from the summary text, which may be empty
    pub fn new(version: Version, description: &str, security: SecurityAttributes) -> Result<Self> {
        let parts = Parts::new()
            .value("description", description)
            .bundles(Bundles::new().with_security(Some(security)));
        Component::from_parts(&DESCRIPTION, version, parts).map(Self)
    }

    /// The summary text, empty when absent
    pub fn description(&self) -> &str {
        self.0.value("description").unwrap_or_default()
    }

    /// Security markings
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.0.security_attributes()
    }
}

/// Builder for [`Description`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionBuilder {
    /// The summary text
    pub description: Option<String>,
    /// Security markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for DescriptionBuilder {
    type Target = Description;

    fn is_empty(&self) -> bool {
        is_blank(&self.description) && self.security.is_empty()
    }

    fn commit(&self, version: Version) -> Result<Option<Description>> {
        if self.is_empty() {
            return Ok(None);
        }
        let security = self.security.commit(version)?;
        Description::new(version, self.description.as_deref().unwrap_or_default(), security)
            .map(Some)
    }
}

impl From<&Description> for DescriptionBuilder {
    fn from(description: &Description) -> Self {
        Self {
            description: Some(description.description().to_string()),
            security: description
                .security_attributes()
                .map(SecurityAttributesBuilder::from)
                .unwrap_or_default(),
        }
    }
}
