//! ddms:verticalExtent

use crate::component::{
    is_blank, Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts,
};
use crate::error::{Error, Result};
use crate::version::Version;

/// Allowed values of `unitOfMeasure`
pub const LENGTH_MEASURE_TYPES: &[&str] = &[
    "Meter",
    "Kilometer",
    "Foot",
    "StatuteMile",
    "NauticalMile",
    "Fathom",
    "Inch",
];

/// Allowed values of `datum`
pub const VERTICAL_DATUM_TYPES: &[&str] = &["MSL", "AGL", "HAE"];

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("unitOfMeasure", FieldKind::Enumerated(LENGTH_MEASURE_TYPES))
        .required(),
    FieldDescriptor::attribute("datum", FieldKind::Enumerated(VERTICAL_DATUM_TYPES)).required(),
    FieldDescriptor::child_text("minVerticalExtent", FieldKind::Double).required(),
    FieldDescriptor::child_text("maxVerticalExtent", FieldKind::Double).required(),
];

/// Descriptor for `ddms:verticalExtent`
pub static VERTICAL_EXTENT: ElementDescriptor = ElementDescriptor {
    name: "verticalExtent",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: &[],
    rules: Some(check_extent_order),
    since: Version::V2_0,
};

fn check_extent_order(component: &Component) -> Result<()> {
    let min = component.double_value("minVerticalExtent");
    let max = component.double_value("maxVerticalExtent");
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(Error::validation(
            "Minimum vertical extent must be less than maximum vertical extent.",
        )),
        _ => Ok(()),
    }
}

component_type!(
    /// A vertical range with its unit and datum
    VerticalExtent,
    VERTICAL_EXTENT
);

impl VerticalExtent {
    /// Build from the extent limits, unit of measure and datum
    pub fn new(
        version: Version,
        min: f64,
        max: f64,
        unit_of_measure: &str,
        datum: &str,
    ) -> Result<Self> {
        let parts = Parts::new()
            .value("unitOfMeasure", unit_of_measure)
            .value("datum", datum)
            .value("minVerticalExtent", min.to_string())
            .value("maxVerticalExtent", max.to_string());
        Component::from_parts(&VERTICAL_EXTENT, version, parts).map(Self)
    }

    /// Lower limit
    pub fn min(&self) -> f64 {
        self.0.double_value("minVerticalExtent").unwrap_or_default()
    }

    /// Upper limit
    pub fn max(&self) -> f64 {
        self.0.double_value("maxVerticalExtent").unwrap_or_default()
    }

    /// Unit of measure token
    pub fn unit_of_measure(&self) -> &str {
        self.0.value("unitOfMeasure").unwrap_or_default()
    }

    /// Vertical datum token
    pub fn datum(&self) -> &str {
        self.0.value("datum").unwrap_or_default()
    }
}

/// Builder for [`VerticalExtent`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerticalExtentBuilder {
    /// Lower limit
    pub min: Option<f64>,
    /// Upper limit
    pub max: Option<f64>,
    /// Unit of measure token
    pub unit_of_measure: Option<String>,
    /// Vertical datum token
    pub datum: Option<String>,
}

impl Builder for VerticalExtentBuilder {
    type Target = VerticalExtent;

    fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && is_blank(&self.unit_of_measure)
            && is_blank(&self.datum)
    }

    fn commit(&self, version: Version) -> Result<Option<VerticalExtent>> {
        if self.is_empty() {
            return Ok(None);
        }
        let parts = Parts::new()
            .value_opt("unitOfMeasure", self.unit_of_measure.clone())
            .value_opt("datum", self.datum.clone())
            .value_opt("minVerticalExtent", self.min.map(|v| v.to_string()))
            .value_opt("maxVerticalExtent", self.max.map(|v| v.to_string()));
        Component::from_parts(&VERTICAL_EXTENT, version, parts)
            .map(VerticalExtent)
            .map(Some)
    }
}

impl From<&VerticalExtent> for VerticalExtentBuilder {
    fn from(extent: &VerticalExtent) -> Self {
        Self {
            min: Some(extent.min()),
            max: Some(extent.max()),
            unit_of_measure: Some(extent.unit_of_measure().to_string()),
            datum: Some(extent.datum().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DdmsComponent;

    #[test]
    fn test_valid_extent() {
        let extent = VerticalExtent::new(Version::V5_0, 0.0, 100.5, "Meter", "AGL").unwrap();
        assert_eq!(extent.max(), 100.5);
        assert_eq!(extent.datum(), "AGL");
        let text = extent.to_text().unwrap();
        assert!(text.contains("verticalExtent.unitOfMeasure: Meter\n"));
        assert!(text.contains("verticalExtent.maxVerticalExtent: 100.5\n"));
    }

    #[test]
    fn test_inverted_extent() {
        let err = VerticalExtent::new(Version::V5_0, 10.0, 1.0, "Meter", "AGL").unwrap_err();
        assert!(err
            .to_string()
            .contains("Minimum vertical extent must be less than maximum vertical extent."));
    }

    #[test]
    fn test_bad_tokens() {
        let err = VerticalExtent::new(Version::V5_0, 0.0, 1.0, "Furlong", "AGL").unwrap_err();
        assert!(err.to_string().contains("unitOfMeasure must be one of the following"));
        assert!(VerticalExtent::new(Version::V5_0, 0.0, 1.0, "Foot", "XYZ").is_err());
    }

    #[test]
    fn test_old_names() {
        let extent = VerticalExtent::new(Version::V3_1, 0.0, 1.0, "Foot", "MSL").unwrap();
        assert!(extent.to_xml().unwrap().contains("<ddms:MinVerticalExtent>0</ddms:MinVerticalExtent>"));
    }
}
