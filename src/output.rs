//! Output formats and field emission
//!
//! HTML and Text output are flat lists of `name`/`value` pairs where the name
//! is a dot-path such as `postalAddress.countryCode.qualifier`. Repeated
//! siblings may carry a `[n]` index depending on [`IndexLevel`].

use crate::config::{IndexLevel, OutputConfig};
use crate::error::{Error, Result};
use std::fmt;

/// Output encodings for components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Canonical XML
    Xml,
    /// HTML `<meta>` lines
    Html,
    /// `name: value` lines
    Text,
    /// JSON object
    Json,
}

impl OutputFormat {
    /// Parse a format name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Some(OutputFormat::Xml),
            "html" => Some(OutputFormat::Html),
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Format name
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Join a parent prefix, an element name and an index suffix
pub fn build_prefix(prefix: &str, name: &str, suffix: &str) -> String {
    format!("{}{}{}", prefix, name, suffix)
}

/// Index suffix for the `index`-th (0-based) of `total` siblings, rendered 1-based
pub fn build_index(index: usize, total: usize, level: IndexLevel) -> Result<String> {
    if total == 0 {
        return Err(Error::Configuration("The total must be at least 1".into()));
    }
    if index >= total {
        return Err(Error::Configuration(
            "The index is not properly bounded".into(),
        ));
    }
    let show = match level {
        IndexLevel::Never => false,
        IndexLevel::WhenPlural => total > 1,
        IndexLevel::Always => true,
    };
    Ok(if show {
        format!("[{}]", index + 1)
    } else {
        String::new()
    })
}

/// Escape a string for an HTML attribute value
pub fn escape_html(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

/// Accumulates HTML or Text lines
#[derive(Debug, Clone)]
pub struct LineWriter {
    format: OutputFormat,
    config: OutputConfig,
    out: String,
}

impl LineWriter {
    /// Create a writer. Only [`OutputFormat::Html`] produces meta lines;
    /// every other format produces text lines.
    pub fn new(format: OutputFormat, config: OutputConfig) -> Self {
        Self {
            format,
            config,
            out: String::new(),
        }
    }

    /// Output options in effect
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Emit a field, skipping empty values
    pub fn field(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.field_always(name, value);
        }
    }

    /// Emit a field even when the value is empty
    pub fn field_always(&mut self, name: &str, value: &str) {
        match self.format {
            OutputFormat::Html => {
                self.out.push_str(&format!(
                    "<meta name=\"{}\" content=\"{}\" />\n",
                    escape_html(name),
                    escape_html(value)
                ));
            }
            _ => {
                self.out.push_str(&format!("{}: {}\n", name, value));
            }
        }
    }

    /// The accumulated output
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_index() {
        assert_eq!(build_index(0, 1, IndexLevel::Never).unwrap(), "");
        assert_eq!(build_index(0, 1, IndexLevel::WhenPlural).unwrap(), "");
        assert_eq!(build_index(1, 2, IndexLevel::WhenPlural).unwrap(), "[2]");
        assert_eq!(build_index(0, 1, IndexLevel::Always).unwrap(), "[1]");
    }

    #[test]
    fn test_build_index_bounds() {
        let err = build_index(0, 0, IndexLevel::Always).unwrap_err();
        assert!(err.to_string().contains("The total must be at least 1"));
        let err = build_index(2, 2, IndexLevel::Always).unwrap_err();
        assert!(err.to_string().contains("The index is not properly bounded"));
    }

    #[test]
    fn test_build_prefix() {
        assert_eq!(build_prefix("", "rights", ""), "rights");
        assert_eq!(build_prefix("postalAddress.", "street", "[1]"), "postalAddress.street[1]");
    }

    #[test]
    fn test_html_lines_are_escaped() {
        let mut writer = LineWriter::new(OutputFormat::Html, OutputConfig::default());
        writer.field("title", "Fish & \"Chips\"");
        writer.field("empty", "");
        assert_eq!(
            writer.finish(),
            "<meta name=\"title\" content=\"Fish &amp; &quot;Chips&quot;\" />\n"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("O'Brien <b>"), "O&apos;Brien &lt;b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_text_lines() {
        let mut writer = LineWriter::new(OutputFormat::Text, OutputConfig::default());
        writer.field("rights.privacyAct", "true");
        writer.field_always("description", "");
        assert_eq!(writer.finish(), "rights.privacyAct: true\ndescription: \n");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("yaml"), None);
        assert_eq!(OutputFormat::Html.to_string(), "html");
    }
}
