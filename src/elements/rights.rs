//! ddms:rights

use crate::component::{Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("privacyAct", FieldKind::Boolean).default_value("false"),
    FieldDescriptor::attribute("intellectualProperty", FieldKind::Boolean).default_value("false"),
    FieldDescriptor::attribute("copyright", FieldKind::Boolean).default_value("false"),
];

/// Descriptor for `ddms:rights`
pub static RIGHTS: ElementDescriptor = ElementDescriptor {
    name: "rights",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// Privacy act, intellectual property and copyright flags
    Rights,
    RIGHTS
);

impl Rights {
    /// Build from the three flags
    pub fn new(
        version: Version,
        privacy_act: bool,
        intellectual_property: bool,
        copyright: bool,
    ) -> Result<Self> {
        let parts = Parts::new()
            .value("privacyAct", privacy_act.to_string())
            .value("intellectualProperty", intellectual_property.to_string())
            .value("copyright", copyright.to_string());
        Component::from_parts(&RIGHTS, version, parts).map(Self)
    }

    /// Privacy Act flag
    pub fn privacy_act(&self) -> bool {
        self.0.bool_value("privacyAct").unwrap_or(false)
    }

    /// Intellectual property flag
    pub fn intellectual_property(&self) -> bool {
        self.0.bool_value("intellectualProperty").unwrap_or(false)
    }

    /// Copyright flag
    pub fn copyright(&self) -> bool {
        self.0.bool_value("copyright").unwrap_or(false)
    }
}

/// Builder for [`Rights`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RightsBuilder {
    /// Privacy Act flag
    pub privacy_act: Option<bool>,
    /// Intellectual property flag
    pub intellectual_property: Option<bool>,
    /// Copyright flag
    pub copyright: Option<bool>,
}

impl Builder for RightsBuilder {
    type Target = Rights;

    fn is_empty(&self) -> bool {
        self.privacy_act.is_none() && self.intellectual_property.is_none() && self.copyright.is_none()
    }

    fn commit(&self, version: Version) -> Result<Option<Rights>> {
        if self.is_empty() {
            return Ok(None);
        }
        Rights::new(
            version,
            self.privacy_act.unwrap_or(false),
            self.intellectual_property.unwrap_or(false),
            self.copyright.unwrap_or(false),
        )
        .map(Some)
    }
}

impl From<&Rights> for RightsBuilder {
    fn from(rights: &Rights) -> Self {
        Self {
            privacy_act: Some(rights.privacy_act()),
            intellectual_property: Some(rights.intellectual_property()),
            copyright: Some(rights.copyright()),
        }
    }
}
