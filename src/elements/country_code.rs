//! ddms:countryCode
//!
//! DDMS 5.0 renamed the two attributes to `codespace` and `code`.

use crate::component::{
    is_blank, Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("qualifier", FieldKind::Text).required(),
    FieldDescriptor::attribute("value", FieldKind::Text).required(),
];

/// Descriptor for `ddms:countryCode`
pub static COUNTRY_CODE: ElementDescriptor = ElementDescriptor {
    name: "countryCode",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: &[],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// A country code drawn from a named vocabulary
    CountryCode,
    COUNTRY_CODE
);

impl CountryCode {
    /// Build from a vocabulary qualifier and a code
    pub fn new(version: Version, qualifier: &str, value: &str) -> Result<Self> {
        let parts = Parts::new()
            .value("qualifier", qualifier)
            .value("value", value);
        Component::from_parts(&COUNTRY_CODE, version, parts).map(Self)
    }

    /// Vocabulary (`codespace` in 5.0)
    pub fn qualifier(&self) -> &str {
        self.0.value("qualifier").unwrap_or_default()
    }

    /// Code (`code` in 5.0)
    pub fn value(&self) -> &str {
        self.0.value("value").unwrap_or_default()
    }
}

/// Builder for [`CountryCode`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCodeBuilder {
    /// Vocabulary
    pub qualifier: Option<String>,
    /// Code
    pub value: Option<String>,
}

impl Builder for CountryCodeBuilder {
    type Target = CountryCode;

    fn is_empty(&self) -> bool {
        is_blank(&self.qualifier) && is_blank(&self.value)
    }

    fn commit(&self, version: Version) -> Result<Option<CountryCode>> {
        if self.is_empty() {
            return Ok(None);
        }
        let parts = Parts::new()
            .value_opt("qualifier", self.qualifier.clone())
            .value_opt("value", self.value.clone());
        Component::from_parts(&COUNTRY_CODE, version, parts)
            .map(CountryCode)
            .map(Some)
    }
}

impl From<&CountryCode> for CountryCodeBuilder {
    fn from(code: &CountryCode) -> Self {
        Self {
            qualifier: Some(code.qualifier().to_string()),
            value: Some(code.value().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DdmsComponent;
    use crate::documents::Document;

    #[test]
    fn test_names_follow_version() {
        let old = CountryCode::new(Version::V4_1, "ISO-3166", "USA").unwrap();
        assert!(old.to_xml().unwrap().contains("ddms:qualifier=\"ISO-3166\""));
        assert_eq!(old.to_text().unwrap(), "countryCode.qualifier: ISO-3166\ncountryCode.value: USA\n");

        let new = CountryCode::new(Version::V5_0, "ISO-3166", "USA").unwrap();
        assert!(new.to_xml().unwrap().contains("ddms:codespace=\"ISO-3166\""));
        assert_eq!(new.to_text().unwrap(), "countryCode.codespace: ISO-3166\ncountryCode.code: USA\n");
        assert_eq!(new.qualifier(), "ISO-3166");
    }

    #[test]
    fn test_old_name_rejected_in_new_version() {
        let xml = r#"<ddms:countryCode xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:qualifier="ISO-3166" ddms:value="USA"/>"#;
        let root = Document::from_string(xml).unwrap().into_root().unwrap();
        let err = CountryCode::from_element(&root).unwrap_err();
        assert!(err.to_string().contains("codespace is required."));
    }

    #[test]
    fn test_builder() {
        let mut builder = CountryCodeBuilder::default();
        assert!(builder.is_empty());
        builder.qualifier = Some("ISO-3166".into());
        assert!(builder.commit(Version::V5_0).is_err());
        builder.value = Some("USA".into());
        assert_eq!(builder.commit(Version::V5_0).unwrap().unwrap().value(), "USA");
    }
}
