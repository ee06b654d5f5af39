//! ISM security attributes
//!
//! The classification markings that can decorate most DDMS elements. The
//! attribute set shifts between versions: `compilationReason` arrived with
//! DDMS 3.0, `declassManualReview` only exists in 2.0, and the exempted
//! source attributes were dropped after 3.1.

use crate::datatypes::{is_xs_date, parse_boolean};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::{is_valid_nmtoken, split_tokens};
use crate::namespaces::QName;
use crate::output::LineWriter;
use crate::version::{Version, VersionRegistry};
use serde_json::{Map, Value};

use super::normalize_tokens;

/// Classification markings accepted in `ISM:classification`
pub const CLASSIFICATIONS: &[&str] = &[
    "U", "C", "S", "TS", "R", "CTS", "CTS-B", "CTS-BALK", "NU", "NR", "NC", "NS", "NS-S", "NS-A",
    "CTSA", "NSAT", "NCA",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Classification,
    Text,
    Tokens,
    Date,
    Boolean,
}

struct SecurityField {
    name: &'static str,
    kind: Kind,
    since: Version,
    until: Option<Version>,
}

const fn field(name: &'static str, kind: Kind) -> SecurityField {
    SecurityField {
        name,
        kind,
        since: Version::V2_0,
        until: None,
    }
}

const fn ranged(
    name: &'static str,
    kind: Kind,
    since: Version,
    until: Option<Version>,
) -> SecurityField {
    SecurityField {
        name,
        kind,
        since,
        until,
    }
}

static FIELDS: &[SecurityField] = &[
    field("classification", Kind::Classification),
    field("ownerProducer", Kind::Tokens),
    field("SCIcontrols", Kind::Tokens),
    field("SARIdentifier", Kind::Tokens),
    field("disseminationControls", Kind::Tokens),
    field("FGIsourceOpen", Kind::Tokens),
    field("FGIsourceProtected", Kind::Tokens),
    field("releasableTo", Kind::Tokens),
    field("nonICmarkings", Kind::Tokens),
    field("classifiedBy", Kind::Text),
    ranged("compilationReason", Kind::Text, Version::V3_0, None),
    field("derivativelyClassifiedBy", Kind::Text),
    field("classificationReason", Kind::Text),
    field("derivedFrom", Kind::Text),
    field("declassDate", Kind::Date),
    field("declassEvent", Kind::Text),
    field("declassException", Kind::Tokens),
    ranged("typeOfExemptedSource", Kind::Tokens, Version::V2_0, Some(Version::V3_1)),
    ranged("dateOfExemptedSource", Kind::Date, Version::V2_0, Some(Version::V3_1)),
    ranged("declassManualReview", Kind::Boolean, Version::V2_0, Some(Version::V2_0)),
];

fn lookup(name: &str) -> Option<&'static SecurityField> {
    FIELDS.iter().find(|f| f.name == name)
}

fn canonical(field: &SecurityField, value: &str) -> String {
    match field.kind {
        Kind::Tokens => normalize_tokens(value),
        Kind::Boolean => parse_boolean(value)
            .map(|b| b.to_string())
            .unwrap_or_else(|| value.trim().to_string()),
        _ => value.trim().to_string(),
    }
}

/// ISM security attributes, kept in a fixed attribute order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecurityAttributes {
    values: Vec<(&'static str, String)>,
}

impl SecurityAttributes {
    /// Build from a classification, owner/producer list and any other named
    /// attributes. Unknown attribute names are ignored.
    pub fn new(
        classification: Option<&str>,
        owner_producers: &[&str],
        others: &[(&str, &str)],
    ) -> Self {
        let mut raw: Vec<(&str, String)> = Vec::new();
        if let Some(classification) = classification {
            raw.push(("classification", classification.to_string()));
        }
        if !owner_producers.is_empty() {
            raw.push(("ownerProducer", owner_producers.join(" ")));
        }
        raw.extend(others.iter().map(|(name, value)| (*name, value.to_string())));
        Self::from_pairs(raw)
    }

    fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let mut found: Vec<(&'static SecurityField, String)> = Vec::new();
        for (name, value) in pairs {
            let Some(field) = lookup(name) else {
                tracing::warn!(attribute = name, "ignoring unknown security attribute");
                continue;
            };
            let value = canonical(field, &value);
            if value.is_empty() {
                continue;
            }
            found.retain(|(f, _)| f.name != field.name);
            found.push((field, value));
        }

        let values = FIELDS
            .iter()
            .filter_map(|field| {
                found
                    .iter()
                    .find(|(f, _)| f.name == field.name)
                    .map(|(_, value)| (field.name, value.clone()))
            })
            .collect();
        Self { values }
    }

    /// Read the ISM attributes of `version` from an element
    pub fn from_element(element: &Element, version: Version) -> Self {
        let namespace = &version.info().ism_namespace;
        Self::from_pairs(FIELDS.iter().filter_map(|field| {
            element
                .attribute(namespace, field.name)
                .map(|value| (field.name, value.to_string()))
        }))
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The classification marking
    pub fn classification(&self) -> Option<&str> {
        self.get("classification")
    }

    /// The owner/producer tokens
    pub fn owner_producers(&self) -> Vec<&str> {
        self.get("ownerProducer").map(split_tokens).unwrap_or_default()
    }

    /// Attribute name/value pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Write the attributes onto an element in the ISM namespace of `version`
    pub fn add_to(&self, element: &mut Element, version: Version) {
        let namespace = &version.info().ism_namespace;
        let prefix = &VersionRegistry::global().prefixes().ism;
        for (name, value) in &self.values {
            element.set_attribute(QName::new(namespace, prefix, *name), value.clone());
        }
    }

    /// Check datatypes, vocabulary and version availability
    pub fn validate(&self, version: Version) -> Result<()> {
        if !self.is_empty() && self.classification().is_none() {
            return Err(Error::validation(
                "classification is required when other security attributes are set.",
            ));
        }

        for (name, value) in &self.values {
            let Some(field) = lookup(name) else { continue };
            if !version.is_at_least(field.since) {
                return Err(Error::validation(format!(
                    "The {} attribute cannot be used until DDMS {} or later.",
                    name, field.since
                )));
            }
            if let Some(until) = field.until {
                if version > until {
                    return Err(Error::validation(format!(
                        "The {} attribute cannot be used after DDMS {}.",
                        name, until
                    )));
                }
            }
            match field.kind {
                Kind::Classification if !CLASSIFICATIONS.contains(&value.as_str()) => {
                    return Err(Error::validation(format!(
                        "{} is not a valid classification.",
                        value
                    )));
                }
                Kind::Tokens => {
                    if let Some(bad) = split_tokens(value).into_iter().find(|t| !is_valid_nmtoken(t))
                    {
                        return Err(Error::validation(format!(
                            "The {} attribute contains an invalid token: {}",
                            name, bad
                        )));
                    }
                }
                Kind::Date if !is_xs_date(value) => {
                    return Err(Error::validation(format!(
                        "The {} attribute must be in the xs:date format (YYYY-MM-DD).",
                        name
                    )));
                }
                Kind::Boolean if parse_boolean(value).is_none() => {
                    return Err(Error::validation(format!(
                        "The {} attribute must be a boolean.",
                        name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Require the classification and owner/producer markings
    pub fn require_classification(&self) -> Result<()> {
        if self.classification().is_none() {
            return Err(Error::validation("classification is required."));
        }
        if self.owner_producers().is_empty() {
            return Err(Error::validation("ownerProducer is required."));
        }
        Ok(())
    }

    /// Emit one line per attribute
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str) {
        for (name, value) in &self.values {
            writer.field(&format!("{}{}", prefix, name), value);
        }
    }

    /// Attribute values as JSON. Token lists become arrays.
    pub fn json_fields(&self) -> Map<String, Value> {
        let mut object = Map::new();
        for (name, value) in &self.values {
            let json = match lookup(name).map(|f| f.kind) {
                Some(Kind::Tokens) => Value::Array(
                    split_tokens(value)
                        .into_iter()
                        .map(|t| Value::String(t.to_string()))
                        .collect(),
                ),
                Some(Kind::Boolean) => parse_boolean(value)
                    .map(Value::Bool)
                    .unwrap_or_else(|| Value::String(value.clone())),
                _ => Value::String(value.clone()),
            };
            object.insert(name.to_string(), json);
        }
        object
    }
}

/// Mutable form of [`SecurityAttributes`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityAttributesBuilder {
    /// Classification marking
    pub classification: Option<String>,
    /// Owner/producer tokens
    pub owner_producers: Vec<String>,
    /// Any other attribute, by name
    pub others: Vec<(String, String)>,
}

impl SecurityAttributesBuilder {
    /// Set or replace another attribute by name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.others.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.others.push((name, value)),
        }
    }

    /// True when nothing has been set
    pub fn is_empty(&self) -> bool {
        self.classification.as_deref().map_or(true, |c| c.trim().is_empty())
            && self.owner_producers.iter().all(|o| o.trim().is_empty())
            && self.others.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Build the (possibly empty) bundle, checked against `version`
    pub fn commit(&self, version: Version) -> Result<SecurityAttributes> {
        let owners: Vec<&str> = self
            .owner_producers
            .iter()
            .map(String::as_str)
            .filter(|o| !o.trim().is_empty())
            .collect();
        let others: Vec<(&str, &str)> = self
            .others
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();
        let attributes = SecurityAttributes::new(
            self.classification.as_deref().filter(|c| !c.trim().is_empty()),
            &owners,
            &others,
        );
        attributes.validate(version)?;
        Ok(attributes)
    }
}

impl From<&SecurityAttributes> for SecurityAttributesBuilder {
    fn from(attributes: &SecurityAttributes) -> Self {
        let mut builder = Self {
            classification: attributes.classification().map(str::to_string),
            owner_producers: attributes
                .owner_producers()
                .into_iter()
                .map(str::to_string)
                .collect(),
            others: Vec::new(),
        };
        for (name, value) in attributes.iter() {
            if name != "classification" && name != "ownerProducer" {
                builder.set(name, value);
            }
        }
        builder
    }
}
