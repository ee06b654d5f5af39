//! ddms:boundingBox
//!
//! Before DDMS 4.0.1 the four limits are spelled `WestBL`, `EastBL`,
//! `SouthBL` and `NorthBL`; the descriptor uses the current names and the
//! version registry supplies the older spelling.

use crate::component::{Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::child_text("westBL", FieldKind::Double)
        .required()
        .range(-180.0, 180.0),
    FieldDescriptor::child_text("eastBL", FieldKind::Double)
        .required()
        .range(-180.0, 180.0),
    FieldDescriptor::child_text("southBL", FieldKind::Double)
        .required()
        .range(-90.0, 90.0),
    FieldDescriptor::child_text("northBL", FieldKind::Double)
        .required()
        .range(-90.0, 90.0),
];

/// Descriptor for `ddms:boundingBox`
pub static BOUNDING_BOX: ElementDescriptor = ElementDescriptor {
    name: "boundingBox",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// A geographic rectangle in decimal degrees
    BoundingBox,
    BOUNDING_BOX
);

impl BoundingBox {
    /// Build from west, east, south and north limits
    pub fn new(version: Version, west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        let parts = Parts::new()
            .value("westBL", west.to_string())
            .value("eastBL", east.to_string())
            .value("southBL", south.to_string())
            .value("northBL", north.to_string());
        Component::from_parts(&BOUNDING_BOX, version, parts).map(Self)
    }

    /// Western longitude
    pub fn west(&self) -> f64 {
        self.limit("westBL")
    }

    /// Eastern longitude
    pub fn east(&self) -> f64 {
        self.limit("eastBL")
    }

    /// Southern latitude
    pub fn south(&self) -> f64 {
        self.limit("southBL")
    }

    /// Northern latitude
    pub fn north(&self) -> f64 {
        self.limit("northBL")
    }

    // Required and validated, so always present once constructed.
    fn limit(&self, field: &str) -> f64 {
        self.0.double_value(field).unwrap_or_default()
    }
}

/// Builder for [`BoundingBox`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBoxBuilder {
    /// Western longitude
    pub west: Option<f64>,
    /// Eastern longitude
    pub east: Option<f64>,
    /// Southern latitude
    pub south: Option<f64>,
    /// Northern latitude
    pub north: Option<f64>,
}

impl Builder for BoundingBoxBuilder {
    type Target = BoundingBox;

    fn is_empty(&self) -> bool {
        [self.west, self.east, self.south, self.north]
            .iter()
            .all(Option::is_none)
    }

    fn commit(&self, version: Version) -> Result<Option<BoundingBox>> {
        if self.is_empty() {
            return Ok(None);
        }
        let text = |value: Option<f64>| value.map(|v| v.to_string());
        let parts = Parts::new()
            .value_opt("westBL", text(self.west))
            .value_opt("eastBL", text(self.east))
            .value_opt("southBL", text(self.south))
            .value_opt("northBL", text(self.north));
        Component::from_parts(&BOUNDING_BOX, version, parts)
            .map(BoundingBox)
            .map(Some)
    }
}

impl From<&BoundingBox> for BoundingBoxBuilder {
    fn from(bounds: &BoundingBox) -> Self {
        Self {
            west: Some(bounds.west()),
            east: Some(bounds.east()),
            south: Some(bounds.south()),
            north: Some(bounds.north()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DdmsComponent;
    use crate::documents::Document;

    #[test]
    fn test_range_checks() {
        let err = BoundingBox::new(Version::V5_0, 200.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("westBL must be between -180 and 180."));

        let bounds = BoundingBox::new(Version::V5_0, -120.0, 120.0, -45.5, 45.5).unwrap();
        assert_eq!(bounds.west(), -120.0);
        assert_eq!(bounds.north(), 45.5);
    }

    #[test]
    fn test_old_names() {
        let bounds = BoundingBox::new(Version::V3_0, 1.0, 2.0, 3.0, 4.0).unwrap();
        let xml = bounds.to_xml().unwrap();
        assert!(xml.contains("<ddms:WestBL>1</ddms:WestBL>"));
        assert!(!xml.contains("westBL"));

        let parsed = BoundingBox::from_element(
            &Document::from_string(&xml).unwrap().into_root().unwrap(),
        )
        .unwrap();
        assert_eq!(parsed, bounds);
    }

    #[test]
    fn test_missing_limit() {
        let xml = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:5">
            <ddms:westBL>1</ddms:westBL><ddms:eastBL>2</ddms:eastBL><ddms:southBL>3</ddms:southBL>
        </ddms:boundingBox>"#;
        let root = Document::from_string(xml).unwrap().into_root().unwrap();
        let err = BoundingBox::from_element(&root).unwrap_err();
        assert!(err.to_string().contains("northBL is required."));
    }

    #[test]
    fn test_partial_builder_fails() {
        let builder = BoundingBoxBuilder {
            west: Some(1.0),
            ..Default::default()
        };
        assert!(!builder.is_empty());
        assert!(builder.commit(Version::V5_0).is_err());
        assert_eq!(builder.west, Some(1.0));
    }
}
