//! ddms:language

use crate::component::{
    is_blank, Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts,
    WarningRule,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("qualifier", FieldKind::Text),
    FieldDescriptor::attribute("value", FieldKind::Text),
];

static WARNINGS: &[WarningRule] = &[
    WarningRule::Companion {
        field: "qualifier",
        companion: "value",
    },
    WarningRule::EmptyElement,
];

/// Descriptor for `ddms:language`
pub static LANGUAGE: ElementDescriptor = ElementDescriptor {
    name: "language",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: WARNINGS,
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// The language of a resource's content
    Language,
    LANGUAGE
);

impl Language {
    /// Build from a vocabulary qualifier and a language code
    pub fn new(version: Version, qualifier: Option<&str>, value: Option<&str>) -> Result<Self> {
        let parts = Parts::new()
            .value_opt("qualifier", qualifier)
            .value_opt("value", value);
        Component::from_parts(&LANGUAGE, version, parts).map(Self)
    }

    /// Vocabulary the code is drawn from
    pub fn qualifier(&self) -> Option<&str> {
        self.0.value("qualifier")
    }

    /// Language code
    pub fn value(&self) -> Option<&str> {
        self.0.value("value")
    }
}

/// Builder for [`Language`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBuilder {
    /// Vocabulary
    pub qualifier: Option<String>,
    /// Language code
    pub value: Option<String>,
}

impl Builder for LanguageBuilder {
    type Target = Language;

    fn is_empty(&self) -> bool {
        is_blank(&self.qualifier) && is_blank(&self.value)
    }

    fn commit(&self, version: Version) -> Result<Option<Language>> {
        if self.is_empty() {
            return Ok(None);
        }
        Language::new(version, self.qualifier.as_deref(), self.value.as_deref()).map(Some)
    }
}

impl From<&Language> for LanguageBuilder {
    fn from(language: &Language) -> Self {
        Self {
            qualifier: language.qualifier().map(str::to_string),
            value: language.value().map(str::to_string),
        }
    }
}
