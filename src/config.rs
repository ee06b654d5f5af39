//! Configuration properties
//!
//! Properties are simple `key=value` lines. The built-in set ships with the
//! crate; a custom set may override the namespace prefixes and output options
//! but nothing else.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Built-in property text
const DEFAULT_PROPERTIES: &str = include_str!("../resources/ddms.properties");

/// Keys a custom property set is allowed to override
pub const CUSTOMIZABLE_KEYS: &[&str] = &[
    "ddms.prefix",
    "gml.prefix",
    "ism.prefix",
    "ntk.prefix",
    "xlink.prefix",
    "output.indexLevel",
    "output.json.prettyPrint",
    "output.json.inlineAttributes",
];

/// Ordered key/value configuration store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// The properties bundled with the crate
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_PROPERTIES)
    }

    /// Parse `key=value` text. Lines starting with `#` or `!` are comments.
    pub fn parse(text: &str) -> Self {
        let mut entries = IndexMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = match line.split_once('=').or_else(|| line.split_once(':')) {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (line, ""),
            };
            entries.insert(key.to_string(), value.to_string());
        }
        Self { entries }
    }

    /// Load a property file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Built-in properties with the customizable keys of `custom` applied on top
    pub fn with_custom(custom: &Properties) -> Self {
        let mut props = Self::builtin();
        for (key, value) in &custom.entries {
            if CUSTOMIZABLE_KEYS.contains(&key.as_str()) {
                props.entries.insert(key.clone(), value.clone());
            } else {
                tracing::warn!(key = %key, "ignoring non-customizable property");
            }
        }
        props
    }

    /// Set a property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a required property
    pub fn get(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::Configuration(format!("Undefined property: {}", key)))
    }

    /// Get an optional property
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str()).filter(|s| !s.is_empty())
    }

    /// Get a comma-separated list property
    pub fn get_list(&self, key: &str) -> Result<Vec<&str>> {
        Ok(self
            .get(key)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// When to add a `[n]` index to repeated sibling names in HTML/Text output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexLevel {
    /// Never index
    #[default]
    Never,
    /// Index only when more than one sibling shares the name
    WhenPlural,
    /// Always index
    Always,
}

impl IndexLevel {
    /// Parse a property value. Unknown values fall back to [`IndexLevel::Never`].
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "1" => IndexLevel::WhenPlural,
            "2" => IndexLevel::Always,
            _ => IndexLevel::Never,
        }
    }

    /// Numeric form used in properties
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexLevel::Never => "0",
            IndexLevel::WhenPlural => "1",
            IndexLevel::Always => "2",
        }
    }
}

/// Options controlling HTML, Text and JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Sibling index policy
    pub index_level: IndexLevel,
    /// Indent JSON output
    pub json_pretty: bool,
    /// Put bundle attributes directly in the owning JSON object
    pub json_inline_attributes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_level: IndexLevel::Never,
            json_pretty: false,
            json_inline_attributes: true,
        }
    }
}

impl OutputConfig {
    /// Read the `output.*` keys, keeping defaults for any that are absent
    pub fn from_properties(props: &Properties) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            props
                .get_opt(key)
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };
        Self {
            index_level: props
                .get_opt("output.indexLevel")
                .map(IndexLevel::from_str)
                .unwrap_or(defaults.index_level),
            json_pretty: flag("output.json.prettyPrint", defaults.json_pretty),
            json_inline_attributes: flag(
                "output.json.inlineAttributes",
                defaults.json_inline_attributes,
            ),
        }
    }

    /// Set the index level
    pub fn with_index_level(mut self, level: IndexLevel) -> Self {
        self.index_level = level;
        self
    }

    /// Enable or disable pretty JSON
    pub fn with_json_pretty(mut self, pretty: bool) -> Self {
        self.json_pretty = pretty;
        self
    }

    /// Inline bundle attributes in JSON output or nest them
    pub fn with_json_inline_attributes(mut self, inline: bool) -> Self {
        self.json_inline_attributes = inline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_properties() {
        let props = Properties::builtin();
        assert_eq!(props.get("ddms.prefix").unwrap(), "ddms");
        assert_eq!(
            props.get_list("ddms.supportedVersions").unwrap(),
            vec!["2.0", "3.0", "3.1", "4.0.1", "4.1", "5.0"]
        );
        assert_eq!(
            props.get("2.0.ism.xmlNamespace").unwrap(),
            "urn:us:gov:ic:ism:v2"
        );
    }

    #[test]
    fn test_missing_property() {
        let props = Properties::builtin();
        let err = props.get("9.9.ddms.xmlNamespace").unwrap_err();
        assert!(err.to_string().contains("Undefined property: 9.9.ddms.xmlNamespace"));
    }

    #[test]
    fn test_parse_comments_and_separators() {
        let props = Properties::parse("# comment\n! other\n\na = 1\nb:2\nc\n");
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("a").unwrap(), "1");
        assert_eq!(props.get("b").unwrap(), "2");
        assert_eq!(props.get("c").unwrap(), "");
        assert_eq!(props.get_opt("c"), None);
    }

    #[test]
    fn test_custom_only_overrides_allowed_keys() {
        let custom = Properties::parse("ddms.prefix=d\n5.0.ddms.xmlNamespace=urn:bogus\n");
        let props = Properties::with_custom(&custom);
        assert_eq!(props.get("ddms.prefix").unwrap(), "d");
        assert_eq!(
            props.get("5.0.ddms.xmlNamespace").unwrap(),
            "urn:us:mil:ces:metadata:ddms:5"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ism.prefix=icism").unwrap();
        writeln!(file, "output.indexLevel=2").unwrap();

        let props = Properties::from_file(file.path()).unwrap();
        assert_eq!(props.get("ism.prefix").unwrap(), "icism");

        let config = OutputConfig::from_properties(&props);
        assert_eq!(config.index_level, IndexLevel::Always);
        assert!(config.json_inline_attributes);
    }

    #[test]
    fn test_output_config_defaults() {
        let config = OutputConfig::from_properties(&Properties::builtin());
        assert_eq!(config, OutputConfig::default());
        assert_eq!(IndexLevel::from_str("7"), IndexLevel::Never);
        assert_eq!(IndexLevel::from_str("1"), IndexLevel::WhenPlural);
    }
}
