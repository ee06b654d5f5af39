//! ddms:relatedResource

use super::link::{Link, LinkBuilder, LINK};
use crate::bundles::{BundleKind, Bundles, SecurityAttributes, SecurityAttributesBuilder};
use crate::component::{
    is_blank, Builder, BuilderList, BundleRule, Cardinality, ChildDescriptor, Component,
    ElementDescriptor, FieldDescriptor, FieldKind, Parts, WarningRule,
};
use crate::error::Result;
use crate::version::Version;

/// Allowed values of `direction`
pub const DIRECTIONS: &[&str] = &["inbound", "outbound", "bidirectional"];

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("relationship", FieldKind::Uri).required(),
    FieldDescriptor::attribute("direction", FieldKind::Enumerated(DIRECTIONS)),
    FieldDescriptor::attribute("qualifier", FieldKind::Uri).required(),
    FieldDescriptor::attribute("value", FieldKind::Text).required(),
];

static CHILDREN: &[ChildDescriptor] = &[ChildDescriptor::new(&LINK, Cardinality::AT_LEAST_ONE)];

static BUNDLES: &[BundleRule] = &[BundleRule::optional(BundleKind::Security)];

/// Descriptor for `ddms:relatedResource`
pub static RELATED_RESOURCE: ElementDescriptor = ElementDescriptor {
    name: "relatedResource",
    fields: FIELDS,
    children: CHILDREN,
    bundles: BUNDLES,
    warnings: &[WarningRule::DuplicateChildren("link")],
    rules: None,
    since: Version::V4_0_1,
};

component_type!(
    /// A resource this one relates to, identified by qualifier and value and
    /// reached through one or more links
    RelatedResource,
    RELATED_RESOURCE
);

/// Identifying values for [`RelatedResource::new`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Relation<'a> {
    /// Relationship URI
    pub relationship: &'a str,
    /// Optional direction token
    pub direction: Option<&'a str>,
    /// Qualifier URI
    pub qualifier: &'a str,
    /// Identifier of the related resource
    pub value: &'a str,
}

impl RelatedResource {
    /// Build from the relation, its links and optional security markings
    pub fn new(
        version: Version,
        relation: Relation<'_>,
        links: Vec<Link>,
        security: Option<SecurityAttributes>,
    ) -> Result<Self> {
        let parts = Parts::new()
            .value("relationship", relation.relationship)
            .value_opt("direction", relation.direction)
            .value("qualifier", relation.qualifier)
            .value("value", relation.value)
            .children(links.into_iter().map(Component::from))
            .bundles(Bundles::new().with_security(security));
        Component::from_parts(&RELATED_RESOURCE, version, parts).map(Self)
    }

    /// Relationship URI
    pub fn relationship(&self) -> &str {
        self.0.value("relationship").unwrap_or_default()
    }

    /// Direction token
    pub fn direction(&self) -> Option<&str> {
        self.0.value("direction")
    }

    /// Qualifier URI
    pub fn qualifier(&self) -> &str {
        self.0.value("qualifier").unwrap_or_default()
    }

    /// Identifier of the related resource
    pub fn value(&self) -> &str {
        self.0.value("value").unwrap_or_default()
    }

    /// Links, in document order
    pub fn links(&self) -> Vec<Link> {
        self.0
            .children_named(LINK.name)
            .cloned()
            .filter_map(|c| Link::from_component(c).ok())
            .collect()
    }

    /// Security markings
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.0.security_attributes()
    }
}

/// Builder for [`RelatedResource`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedResourceBuilder {
    /// Relationship URI
    pub relationship: Option<String>,
    /// Direction token
    pub direction: Option<String>,
    /// Qualifier URI
    pub qualifier: Option<String>,
    /// Identifier of the related resource
    pub value: Option<String>,
    /// Links
    pub links: BuilderList<LinkBuilder>,
    /// Security markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for RelatedResourceBuilder {
    type Target = RelatedResource;

    fn is_empty(&self) -> bool {
        is_blank(&self.relationship)
            && is_blank(&self.direction)
            && is_blank(&self.qualifier)
            && is_blank(&self.value)
            && self.links.is_empty()
            && self.security.is_empty()
    }

    fn commit(&self, version: Version) -> Result<Option<RelatedResource>> {
        if self.is_empty() {
            return Ok(None);
        }
        let links = self.links.commit_all(version)?;
        let security = self.security.commit(version)?;
        let parts = Parts::new()
            .value_opt("relationship", self.relationship.clone())
            .value_opt("direction", self.direction.clone())
            .value_opt("qualifier", self.qualifier.clone())
            .value_opt("value", self.value.clone())
            .children(links.into_iter().map(Component::from))
            .bundles(Bundles::new().with_security(Some(security)));
        Component::from_parts(&RELATED_RESOURCE, version, parts)
            .map(RelatedResource)
            .map(Some)
    }
}

impl From<&RelatedResource> for RelatedResourceBuilder {
    fn from(resource: &RelatedResource) -> Self {
        Self {
            relationship: Some(resource.relationship().to_string()),
            direction: resource.direction().map(str::to_string),
            qualifier: Some(resource.qualifier().to_string()),
            value: Some(resource.value().to_string()),
            links: resource
                .links()
                .iter()
                .map(LinkBuilder::from)
                .collect::<Vec<_>>()
                .into(),
            security: resource
                .security_attributes()
                .map(SecurityAttributesBuilder::from)
                .unwrap_or_default(),
        }
    }
}
