//! Spatial reference system attributes
//!
//! The unqualified `srsName`, `srsDimension`, `axisLabels` and `uomLabels`
//! attributes that GML geometry carries.

use crate::datatypes::is_valid_uri;
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::is_valid_ncname;
use crate::namespaces::QName;
use crate::output::LineWriter;
use serde_json::{Map, Value};

/// SRS attributes. Label lists keep their order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SrsAttributes {
    srs_name: Option<String>,
    srs_dimension: Option<String>,
    axis_labels: Vec<String>,
    uom_labels: Vec<String>,
}

fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn labels<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

impl SrsAttributes {
    /// Build from raw values; blank values count as unset
    pub fn new<S: AsRef<str>>(
        srs_name: Option<&str>,
        srs_dimension: Option<u32>,
        axis_labels: &[S],
        uom_labels: &[S],
    ) -> Self {
        Self {
            srs_name: clean(srs_name),
            srs_dimension: srs_dimension.map(|d| d.to_string()),
            axis_labels: labels(axis_labels),
            uom_labels: labels(uom_labels),
        }
    }

    /// Read the unqualified SRS attributes of an element
    pub fn from_element(element: &Element) -> Self {
        let read = |name: &str| element.attribute("", name);
        let srs_dimension = clean(read("srsDimension")).map(|raw| match raw.parse::<u32>() {
            Ok(dimension) => dimension.to_string(),
            Err(_) => raw,
        });
        Self {
            srs_name: clean(read("srsName")),
            srs_dimension,
            axis_labels: labels(&read("axisLabels").into_iter().collect::<Vec<_>>()),
            uom_labels: labels(&read("uomLabels").into_iter().collect::<Vec<_>>()),
        }
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self.srs_name.is_none()
            && self.srs_dimension.is_none()
            && self.axis_labels.is_empty()
            && self.uom_labels.is_empty()
    }

    /// `srsName`
    pub fn srs_name(&self) -> Option<&str> {
        self.srs_name.as_deref()
    }

    /// `srsDimension`, if set and numeric
    pub fn srs_dimension(&self) -> Option<u32> {
        self.srs_dimension.as_deref().and_then(|d| d.parse().ok())
    }

    /// `axisLabels`
    pub fn axis_labels(&self) -> &[String] {
        &self.axis_labels
    }

    /// `uomLabels`
    pub fn uom_labels(&self) -> &[String] {
        &self.uom_labels
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        [
            ("srsName", self.srs_name.clone()),
            ("srsDimension", self.srs_dimension.clone()),
            ("axisLabels", Some(self.axis_labels.join(" "))),
            ("uomLabels", Some(self.uom_labels.join(" "))),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
    }

    /// Write the attributes onto an element
    pub fn add_to(&self, element: &mut Element) {
        for (name, value) in self.iter() {
            element.set_attribute(QName::local(name), value);
        }
    }

    /// Check the values and the companion rules between them
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.srs_name() {
            if !is_valid_uri(name) {
                return Err(Error::validation(format!("Invalid URI (srsName): {}", name)));
            }
        }
        if self.srs_dimension.is_some() && self.srs_dimension().is_none() {
            return Err(Error::validation("The srsDimension must be a positive integer."));
        }
        if self.srs_name.is_none() && !self.axis_labels.is_empty() {
            return Err(Error::validation(
                "The axisLabels attribute can only be used in tandem with an srsName.",
            ));
        }
        if self.axis_labels.is_empty() && !self.uom_labels.is_empty() {
            return Err(Error::validation(
                "The uomLabels attribute can only be used in tandem with axisLabels.",
            ));
        }
        if let Some(label) = self
            .axis_labels
            .iter()
            .chain(&self.uom_labels)
            .find(|label| !is_valid_ncname(label))
        {
            return Err(Error::validation(format!("\"{}\" is not a valid NCName.", label)));
        }
        Ok(())
    }

    /// Require an `srsName`
    pub fn require_name(&self) -> Result<()> {
        match self.srs_name {
            Some(_) => Ok(()),
            None => Err(Error::validation("srsName is required.")),
        }
    }

    /// Emit one line per attribute
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str) {
        for (name, value) in self.iter() {
            writer.field(&format!("{}{}", prefix, name), &value);
        }
    }

    /// `srsDimension` as a number, label lists as arrays
    pub fn json_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(name) = self.srs_name() {
            fields.insert("srsName".into(), Value::String(name.to_string()));
        }
        if let Some(dimension) = self.srs_dimension() {
            fields.insert("srsDimension".into(), Value::from(dimension));
        }
        let list = |values: &[String]| Value::Array(values.iter().cloned().map(Value::String).collect());
        if !self.axis_labels.is_empty() {
            fields.insert("axisLabels".into(), list(&self.axis_labels));
        }
        if !self.uom_labels.is_empty() {
            fields.insert("uomLabels".into(), list(&self.uom_labels));
        }
        fields
    }
}

/// Mutable form of [`SrsAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrsAttributesBuilder {
    /// `srsName`
    pub srs_name: Option<String>,
    /// `srsDimension`
    pub srs_dimension: Option<u32>,
    /// `axisLabels`
    pub axis_labels: Vec<String>,
    /// `uomLabels`
    pub uom_labels: Vec<String>,
}

impl SrsAttributesBuilder {
    /// True when nothing has been set
    pub fn is_empty(&self) -> bool {
        self.preview().is_empty()
    }

    fn preview(&self) -> SrsAttributes {
        SrsAttributes::new(
            self.srs_name.as_deref(),
            self.srs_dimension,
            &self.axis_labels,
            &self.uom_labels,
        )
    }

    /// Build the (possibly empty) bundle
    pub fn commit(&self) -> Result<SrsAttributes> {
        let attributes = self.preview();
        attributes.validate()?;
        Ok(attributes)
    }
}

impl From<&SrsAttributes> for SrsAttributesBuilder {
    fn from(attributes: &SrsAttributes) -> Self {
        Self {
            srs_name: attributes.srs_name().map(str::to_string),
            srs_dimension: attributes.srs_dimension(),
            axis_labels: attributes.axis_labels().to_vec(),
            uom_labels: attributes.uom_labels().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSG: &str = "http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D";

    fn wgs84() -> SrsAttributes {
        SrsAttributes::new(Some(EPSG), Some(10), &["A B"], &["Meter", "Meter"])
    }

    #[test]
    fn test_labels_split_on_whitespace() {
        let srs = wgs84();
        assert_eq!(srs.axis_labels(), ["A", "B"]);
        assert_eq!(srs.uom_labels(), ["Meter", "Meter"]);
        assert_eq!(srs.srs_dimension(), Some(10));
        assert!(srs.validate().is_ok());
    }

    #[test]
    fn test_companion_rules() {
        let no_name = SrsAttributes::new(None, None, &["A"], &[]);
        assert_eq!(
            no_name.validate().unwrap_err().to_string(),
            "validation error: The axisLabels attribute can only be used in tandem with an srsName."
        );

        let no_axes = SrsAttributes::new(Some(EPSG), None, &[], &["Meter"]);
        assert!(no_axes
            .validate()
            .unwrap_err()
            .to_string()
            .contains("only be used in tandem with axisLabels"));

        let dimension_only = SrsAttributes::new::<&str>(None, Some(2), &[], &[]);
        assert!(dimension_only.validate().is_ok());
        assert!(dimension_only.require_name().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let bad_uri = SrsAttributes::new::<&str>(Some(":::::"), None, &[], &[]);
        assert!(bad_uri.validate().is_err());

        let bad_label = SrsAttributes::new(Some(EPSG), None, &["1st"], &[]);
        assert!(bad_label.validate().unwrap_err().to_string().contains("NCName"));

        let element = Element::new(QName::local("pos")).with_attribute(QName::local("srsDimension"), "-1");
        let srs = SrsAttributes::from_element(&element);
        assert_eq!(
            srs.validate().unwrap_err().to_string(),
            "validation error: The srsDimension must be a positive integer."
        );
    }

    #[test]
    fn test_element_round_trip() {
        let srs = wgs84();
        let mut element = Element::new(QName::local("pos"));
        srs.add_to(&mut element);
        assert_eq!(element.attribute("", "axisLabels"), Some("A B"));
        assert_eq!(SrsAttributes::from_element(&element), srs);

        let padded = Element::new(QName::local("pos")).with_attribute(QName::local("srsDimension"), " 03 ");
        assert_eq!(SrsAttributes::from_element(&padded).srs_dimension(), Some(3));
    }

    #[test]
    fn test_builder() {
        let builder = SrsAttributesBuilder::default();
        assert!(builder.is_empty());
        assert!(builder.commit().unwrap().is_empty());

        let blank = SrsAttributesBuilder {
            srs_name: Some("  ".into()),
            axis_labels: vec![" ".into()],
            ..Default::default()
        };
        assert!(blank.is_empty());

        let srs = wgs84();
        let builder = SrsAttributesBuilder::from(&srs);
        assert_eq!(builder.commit().unwrap(), srs);

        let broken = SrsAttributesBuilder {
            uom_labels: vec!["Meter".into()],
            ..Default::default()
        };
        assert!(broken.commit().is_err());
        assert_eq!(broken.uom_labels, ["Meter"]);
    }

    #[test]
    fn test_output() {
        let srs = wgs84();
        let json = srs.json_fields();
        assert_eq!(json["srsDimension"], 10);
        assert_eq!(json["axisLabels"], serde_json::json!(["A", "B"]));

        let mut writer = LineWriter::new(crate::output::OutputFormat::Text, Default::default());
        srs.write_lines(&mut writer, "pos.");
        assert_eq!(
            writer.finish(),
            format!(
                "pos.srsName: {}\npos.srsDimension: 10\npos.axisLabels: A B\npos.uomLabels: Meter Meter\n",
                EPSG
            )
        );
    }
}
