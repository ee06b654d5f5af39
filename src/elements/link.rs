//! ddms:link

use crate::bundles::{
    BundleKind, Bundles, SecurityAttributes, SecurityAttributesBuilder, XLinkAttributes,
    XLinkAttributesBuilder,
};
use crate::component::{Builder, BundleRequirement, BundleRule, Component, ElementDescriptor, Parts};
use crate::error::Result;
use crate::version::Version;

static BUNDLES: &[BundleRule] = &[
    BundleRule::requiring(BundleKind::XLink, BundleRequirement::Locator),
    BundleRule::optional(BundleKind::Security).since(Version::V4_0_1),
];

/// Descriptor for `ddms:link`
pub static LINK: ElementDescriptor = ElementDescriptor {
    name: "link",
    fields: &[],
    children: &[],
    bundles: BUNDLES,
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// An XLink locator pointing at a related resource
    Link,
    LINK
);

impl Link {
    /// Build from locator attributes and optional security markings
    pub fn new(
        version: Version,
        xlink: XLinkAttributes,
        security: Option<SecurityAttributes>,
    ) -> Result<Self> {
        let parts = Parts::new().bundles(
            Bundles::new()
                .with_xlink(Some(xlink))
                .with_security(security),
        );
        Component::from_parts(&LINK, version, parts).map(Self)
    }

    /// Locator attributes
    pub fn xlink_attributes(&self) -> Option<&XLinkAttributes> {
        self.0.xlink_attributes()
    }

    /// Security markings
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.0.security_attributes()
    }
}

/// Builder for [`Link`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuilder {
    /// Locator attributes
    pub xlink: XLinkAttributesBuilder,
    /// Security markings
    pub security: SecurityAttributesBuilder,
}

impl Builder for LinkBuilder {
    type Target = Link;

    fn is_empty(&self) -> bool {
        self.xlink.is_empty() && self.security.is_empty()
    }

    fn commit(&self, version: Version) -> Result<Option<Link>> {
        if self.is_empty() {
            return Ok(None);
        }
        let xlink = self.xlink.commit(version)?;
        let security = self.security.commit(version)?;
        Link::new(version, xlink, Some(security)).map(Some)
    }
}

impl From<&Link> for LinkBuilder {
    fn from(link: &Link) -> Self {
        Self {
            xlink: link
                .xlink_attributes()
                .map(XLinkAttributesBuilder::from)
                .unwrap_or_default(),
            security: link
                .security_attributes()
                .map(SecurityAttributesBuilder::from)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DdmsComponent;

    fn locator() -> XLinkAttributes {
        XLinkAttributes::locator("http://en.wikipedia.org/wiki/Tank", Some("tank"), Some("Tank Page"), Some("tank"))
    }

    #[test]
    fn test_link() {
        let link = Link::new(Version::V5_0, locator(), None).unwrap();
        assert_eq!(
            link.to_text().unwrap(),
            "link.type: locator\n\
             link.href: http://en.wikipedia.org/wiki/Tank\n\
             link.role: tank\n\
             link.title: Tank Page\n\
             link.label: tank\n"
        );
        assert!(link.to_xml().unwrap().contains("xlink:type=\"locator\""));
    }

    #[test]
    fn test_requires_locator() {
        let simple = XLinkAttributes::new(Some("simple"), Some("urn:x"), None, None, None);
        let err = Link::new(Version::V5_0, simple, None).unwrap_err();
        assert!(err
            .to_string()
            .contains("The type attribute must have a fixed value of \"locator\"."));

        let err = Link::new(Version::V5_0, XLinkAttributes::default(), None).unwrap_err();
        assert!(err.to_string().contains("locator"));
    }

    #[test]
    fn test_security_gated() {
        let security = SecurityAttributes::new(Some("U"), &["USA"], &[]);
        assert!(Link::new(Version::V3_1, locator(), Some(security.clone())).is_err());
        assert!(Link::new(Version::V4_1, locator(), Some(security)).is_ok());
    }

    #[test]
    fn test_builder_round_trip() {
        let link = Link::new(Version::V5_0, locator(), None).unwrap();
        let builder = LinkBuilder::from(&link);
        assert_eq!(builder.commit(Version::V5_0).unwrap(), Some(link));
    }
}
