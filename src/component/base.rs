//! The generic component
//!
//! Both construction paths end in [`Component::extract`]: raw values are
//! first assembled into an [`Element`] and then read back exactly as a parsed
//! tree would be, so validation, the value snapshot and equality never depend
//! on how a component was built.

use super::descriptor::{ElementDescriptor, FieldDescriptor, FieldKind, Placement};
use super::validation;
use crate::bundles::{
    Bundles, ExtensibleAttributes, SecurityAttributes, SrsAttributes, XLinkAttributes,
};
use crate::datatypes::{canonical_double, parse_boolean, parse_double};
use crate::documents::Element;
use crate::error::{Error, Result, ValidationMessage};
use crate::namespaces::QName;
use crate::version::{Version, VersionRegistry};
use std::hash::{Hash, Hasher};

/// Raw values for [`Component::from_parts`]
#[derive(Debug, Clone, Default)]
pub struct Parts {
    values: Vec<(&'static str, Vec<String>)>,
    children: Vec<Component>,
    bundles: Bundles,
}

impl Parts {
    /// No values
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, name: &'static str) -> &mut Vec<String> {
        let index = match self.values.iter().position(|(n, _)| *n == name) {
            Some(index) => index,
            None => {
                self.values.push((name, Vec::new()));
                self.values.len() - 1
            }
        };
        &mut self.values[index].1
    }

    /// Add one value for a field
    pub fn value(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.slot(name).push(value.into());
        self
    }

    /// Add a value for a field if present
    pub fn value_opt<S: Into<String>>(self, name: &'static str, value: Option<S>) -> Self {
        match value {
            Some(value) => self.value(name, value),
            None => self,
        }
    }

    /// Add several values for a repeatable field
    pub fn values<I, S>(mut self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slot(name).extend(values.into_iter().map(Into::into));
        self
    }

    /// Add a nested component
    pub fn child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Add nested components
    pub fn children(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attach bundles
    pub fn bundles(mut self, bundles: Bundles) -> Self {
        self.bundles = bundles;
        self
    }
}

/// A validated, immutable DDMS component
#[derive(Debug, Clone)]
pub struct Component {
    pub(super) descriptor: &'static ElementDescriptor,
    pub(super) version: Version,
    pub(super) element: Element,
    pub(super) values: Vec<Vec<String>>,
    pub(super) children: Vec<Component>,
    pub(super) bundles: Bundles,
    pub(super) warnings: Vec<ValidationMessage>,
}

impl Component {
    /// Build from a parsed element, taking the version from its namespace.
    ///
    /// A namespace shared by several versions resolves to the most recent.
    pub fn from_element(descriptor: &'static ElementDescriptor, element: &Element) -> Result<Self> {
        let version =
            VersionRegistry::global().require_version_for_namespace(element.namespace())?;
        Self::extract(descriptor, element, version)
    }

    /// Build from a parsed element read as a specific version
    pub fn from_element_as(
        descriptor: &'static ElementDescriptor,
        element: &Element,
        version: Version,
    ) -> Result<Self> {
        Self::extract(descriptor, element, version)
    }

    /// Build from raw values
    pub fn from_parts(
        descriptor: &'static ElementDescriptor,
        version: Version,
        parts: Parts,
    ) -> Result<Self> {
        let namespace = version.ddms_namespace();
        let prefix = &VersionRegistry::global().prefixes().ddms;
        let qname = QName::new(namespace, prefix, descriptor.name);
        let locator = qname.qualified();

        for (name, _) in &parts.values {
            if descriptor.field(name).is_none() {
                return Err(Error::validation(format!(
                    "{} is not a field of ddms:{}.",
                    name, descriptor.name
                ))
                .located(&locator));
            }
        }
        for kind in parts.bundles.kinds() {
            if descriptor.bundle(kind).is_none() {
                return Err(Error::validation(format!(
                    "{} attributes cannot be applied to the ddms:{} element.",
                    kind, descriptor.name
                ))
                .located(&locator));
            }
        }

        let mut element = Element::new(qname);
        for field in descriptor.fields {
            let values: Vec<&str> = parts
                .values
                .iter()
                .filter(|(name, _)| *name == field.name)
                .flat_map(|(_, values)| values.iter())
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            let name = descriptor.field_name(field, version);
            match field.placement {
                Placement::Attribute | Placement::Text if values.len() > 1 => {
                    return Err(validation::too_many(&name, field.cardinality).located(&locator));
                }
                Placement::Attribute => {
                    if let Some(value) = values.first() {
                        element.set_attribute(QName::new(namespace, prefix, &name), *value);
                    }
                }
                Placement::ChildText => {
                    for value in values {
                        element.add_child(
                            Element::new(QName::new(namespace, prefix, &name)).with_text(value),
                        );
                    }
                }
                Placement::Text => {
                    if let Some(value) = values.first() {
                        element.set_text(*value);
                    }
                }
            }
        }
        for child in &parts.children {
            element.add_child(child.element.clone());
        }
        parts
            .bundles
            .add_to(&mut element, version)
            .map_err(|e| e.located(&locator))?;

        Self::extract(descriptor, &element, version)
    }

    /// Read values, nested components and bundles from `element`, then validate
    pub(crate) fn extract(
        descriptor: &'static ElementDescriptor,
        element: &Element,
        version: Version,
    ) -> Result<Self> {
        let locator = element.qname.qualified();
        let namespace = version.ddms_namespace();

        let values = descriptor
            .fields
            .iter()
            .map(|field| read_field(descriptor, field, element, version))
            .collect();

        let mut children = Vec::new();
        for child in descriptor.children {
            for child_element in element.children_named(namespace, child.descriptor.name) {
                let component = Self::extract(child.descriptor, child_element, version)
                    .map_err(|e| e.located(&locator))?;
                children.push(component);
            }
        }

        let mut component = Self {
            descriptor,
            version,
            element: element.clone(),
            values,
            children,
            bundles: Bundles::from_element(element, version, &descriptor.bundle_kinds()),
            warnings: Vec::new(),
        };

        if let Err(err) = validation::validate(&component) {
            tracing::debug!(element = %locator, version = %version, error = %err, "rejected component");
            return Err(err.located(&locator));
        }
        component.warnings = validation::warnings(&component);
        tracing::debug!(
            element = %locator,
            version = %version,
            warnings = component.warnings.len(),
            "constructed component"
        );
        Ok(component)
    }

    // ===== Accessors =====

    /// Descriptor of this element type
    pub fn descriptor(&self) -> &'static ElementDescriptor {
        self.descriptor
    }

    /// Local element name
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Version the component was built for
    pub fn version(&self) -> Version {
        self.version
    }

    /// DDMS namespace of the component
    pub fn namespace(&self) -> &str {
        self.element.namespace()
    }

    /// `prefix:name` of the element
    pub fn qualified_name(&self) -> String {
        self.element.qname.qualified()
    }

    /// The backing element tree
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Nested components in document order
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Nested components with the given element name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> + 'a {
        self.children.iter().filter(move |c| c.name() == name)
    }

    /// First nested component with the given element name
    pub fn child(&self, name: &str) -> Option<&Component> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Attached bundles
    pub fn bundles(&self) -> &Bundles {
        &self.bundles
    }

    /// Security attributes, if any
    pub fn security_attributes(&self) -> Option<&SecurityAttributes> {
        self.bundles.security.as_ref()
    }

    /// XLink attributes, if any
    pub fn xlink_attributes(&self) -> Option<&XLinkAttributes> {
        self.bundles.xlink.as_ref()
    }

    /// Extensible attributes, if any
    pub fn extensible_attributes(&self) -> Option<&ExtensibleAttributes> {
        self.bundles.extensible.as_ref()
    }

    /// SRS attributes, if any
    pub fn srs_attributes(&self) -> Option<&SrsAttributes> {
        self.bundles.srs.as_ref()
    }

    /// Warnings, including those of nested components
    pub fn warnings(&self) -> &[ValidationMessage] {
        &self.warnings
    }

    /// All canonical values of a field, by logical name
    pub fn values(&self, field: &str) -> &[String] {
        self.descriptor
            .field(field)
            .map(|(index, _)| self.values[index].as_slice())
            .unwrap_or(&[])
    }

    /// First canonical value of a field, by logical name
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values(field).first().map(String::as_str)
    }

    /// A boolean field
    pub fn bool_value(&self, field: &str) -> Option<bool> {
        self.value(field).and_then(parse_boolean)
    }

    /// A double field
    pub fn double_value(&self, field: &str) -> Option<f64> {
        self.value(field).and_then(parse_double)
    }

    /// Index-aligned values, for the engine
    pub(super) fn field_values(&self) -> impl Iterator<Item = (&FieldDescriptor, &[String])> {
        self.descriptor
            .fields
            .iter()
            .zip(self.values.iter().map(Vec::as_slice))
    }
}

fn canonical(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Boolean => parse_boolean(value)
            .map(|b| b.to_string())
            .unwrap_or_else(|| value.to_string()),
        FieldKind::Double => parse_double(value)
            .filter(|d| d.is_finite())
            .map(canonical_double)
            .unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

fn read_field(
    descriptor: &ElementDescriptor,
    field: &FieldDescriptor,
    element: &Element,
    version: Version,
) -> Vec<String> {
    let namespace = version.ddms_namespace();
    let name = descriptor.field_name(field, version);
    let raw: Vec<&str> = match field.placement {
        Placement::Attribute => element.attribute(namespace, &name).into_iter().collect(),
        Placement::ChildText => element
            .children_named(namespace, &name)
            .map(Element::text)
            .collect(),
        Placement::Text => vec![element.text()],
    };

    let mut values: Vec<String> = raw
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| canonical(field.kind, v))
        .collect();
    if values.is_empty() && field.applies_to(version) {
        if let Some(default) = field.default {
            values.push(default.to_string());
        }
    }
    values
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name
            && self.namespace() == other.namespace()
            && self.values == other.values
            && self.children == other.children
            && self.bundles == other.bundles
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name.hash(state);
        self.namespace().hash(state);
        self.values.hash(state);
        self.children.hash(state);
        self.bundles.hash(state);
    }
}
