//! The component model
//!
//! [`Component`] is the single engine behind every DDMS element type. Element
//! types in [`crate::elements`] are thin wrappers that supply an
//! [`ElementDescriptor`] and typed accessors; everything else is shared
//! through [`DdmsComponent`].

pub mod base;
pub mod builder;
pub mod descriptor;
mod render;
mod validation;

pub use base::{Component, Parts};
pub use builder::{is_blank, Builder, BuilderList};
pub use descriptor::{
    BundleRequirement, BundleRule, Cardinality, ChildDescriptor, ElementDescriptor,
    FieldDescriptor, FieldKind, Placement, RuleFn, WarningRule,
};

use crate::config::OutputConfig;
use crate::documents::Element;
use crate::error::{Result, ValidationMessage};
use crate::output::OutputFormat;
use crate::version::Version;

/// Behaviour shared by every component type
pub trait DdmsComponent {
    /// The underlying generic component
    fn component(&self) -> &Component;

    /// Local element name
    fn name(&self) -> &'static str {
        self.component().name()
    }

    /// `prefix:name` of the element
    fn qualified_name(&self) -> String {
        self.component().qualified_name()
    }

    /// Version the component was built for
    fn version(&self) -> Version {
        self.component().version()
    }

    /// Namespace of the element
    fn namespace(&self) -> &str {
        self.component().namespace()
    }

    /// The backing element tree
    fn element(&self) -> &Element {
        self.component().element()
    }

    /// Warnings, including those of nested components
    fn warnings(&self) -> &[ValidationMessage] {
        self.component().warnings()
    }

    /// Canonical XML
    fn to_xml(&self) -> Result<String> {
        self.component().to_xml()
    }

    /// HTML meta lines
    fn to_html(&self) -> Result<String> {
        self.component().to_html()
    }

    /// Text lines
    fn to_text(&self) -> Result<String> {
        self.component().to_text()
    }

    /// JSON object
    fn to_json(&self) -> Result<String> {
        self.component().to_json()
    }

    /// Render with explicit options
    fn render(&self, format: OutputFormat, config: OutputConfig) -> Result<String> {
        self.component().render(format, config)
    }
}

impl DdmsComponent for Component {
    fn component(&self) -> &Component {
        self
    }
}
