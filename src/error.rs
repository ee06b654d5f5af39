//! Error types for ddms
//!
//! Construction failures surface as [`Error::Validation`] carrying a
//! [`ValidationError`]; non-fatal findings on valid components are
//! [`ValidationMessage`]s with [`MessageKind::Warning`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using the ddms Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ddms operations
#[derive(Error, Debug)]
pub enum Error {
    /// A component failed validation during construction
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown version, missing property or bad output option
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML reading or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a validation error with no locator yet
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::new(message))
    }

    /// Prefix the locator of a validation error with a parent element name.
    /// Other error kinds pass through untouched.
    pub fn located(self, parent: &str) -> Self {
        match self {
            Error::Validation(err) => Error::Validation(err.with_parent(parent)),
            other => other,
        }
    }
}

/// Validation failure with the location of the offending component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Dot-separated path of qualified element names, outermost first
    pub locator: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: String::new(),
        }
    }

    /// Set the locator, replacing any existing one
    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }

    /// Prepend an ancestor element to the locator
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.locator = join_locator(parent, &self.locator);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if !self.locator.is_empty() {
            write!(f, " (at {})", self.locator)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Severity of a [`ValidationMessage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// The component could not be constructed
    Error,
    /// Advisory finding on a valid component
    Warning,
}

impl MessageKind {
    /// String form used in rendered messages
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message attached to a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationMessage {
    /// Error or warning
    pub kind: MessageKind,
    /// Human readable text
    pub text: String,
    /// Dot-separated path of qualified element names
    pub locator: String,
}

impl ValidationMessage {
    /// Create a warning located at the given element
    pub fn warning(text: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            text: text.into(),
            locator: locator.into(),
        }
    }

    /// Create an error message from a validation failure
    pub fn from_error(error: &ValidationError) -> Self {
        Self {
            kind: MessageKind::Error,
            text: error.message.clone(),
            locator: error.locator.clone(),
        }
    }

    /// Re-root this message under an ancestor element
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.locator = join_locator(parent, &self.locator);
        self
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.text)?;
        if !self.locator.is_empty() {
            write!(f, " (at {})", self.locator)?;
        }
        Ok(())
    }
}

fn join_locator(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}.{}", parent, child),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("westBL is required.").with_locator("ddms:boundingBox");

        let msg = format!("{}", err);
        assert!(msg.contains("westBL is required."));
        assert!(msg.contains("ddms:boundingBox"));
    }

    #[test]
    fn test_locator_prefixing() {
        let err = ValidationError::new("bad")
            .with_locator("ddms:countryCode")
            .with_parent("ddms:postalAddress");
        assert_eq!(err.locator, "ddms:postalAddress.ddms:countryCode");

        let bare = ValidationError::new("bad").with_parent("ddms:link");
        assert_eq!(bare.locator, "ddms:link");
    }

    #[test]
    fn test_located_leaves_other_errors_alone() {
        let err = Error::Configuration("x".into()).located("ddms:title");
        assert!(matches!(err, Error::Configuration(_)));

        let err = Error::validation("x").located("ddms:title");
        match err {
            Error::Validation(v) => assert_eq!(v.locator, "ddms:title"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_warning_display() {
        let msg = ValidationMessage::warning("A ddms:dates element was found with no value.", "ddms:dates")
            .with_parent("ddms:resource");
        assert_eq!(msg.kind, MessageKind::Warning);
        assert_eq!(
            msg.to_string(),
            "[warning] A ddms:dates element was found with no value. (at ddms:resource.ddms:dates)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new("test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));
    }
}
