//! Static element descriptors
//!
//! Each element type is described once by an [`ElementDescriptor`]: its
//! fields, nested components, bundles and warning rules. The generic engine
//! in [`super::Component`] reads these tables to parse, validate and render
//! every element type the same way.

use super::Component;
use crate::bundles::BundleKind;
use crate::error::Result;
use crate::version::Version;

/// Where a field lives in the XML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A DDMS-namespaced attribute on the element
    Attribute,
    /// The text of a DDMS-namespaced child element
    ChildText,
    /// The element's own text
    Text,
}

/// Lexical type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string
    Text,
    /// xs:boolean
    Boolean,
    /// xs:double
    Double,
    /// xs:dateTime, xs:date, xs:gYearMonth or xs:gYear
    Date,
    /// xs:anyURI
    Uri,
    /// xs:NCName
    NcName,
    /// One of a fixed set of tokens
    Enumerated(&'static [&'static str]),
}

/// Minimum and maximum number of occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Minimum occurrences
    pub min: usize,
    /// Maximum occurrences, `usize::MAX` when unbounded
    pub max: usize,
}

impl Cardinality {
    /// Zero or one
    pub const OPTIONAL: Cardinality = Cardinality { min: 0, max: 1 };
    /// Exactly one
    pub const REQUIRED: Cardinality = Cardinality { min: 1, max: 1 };
    /// Zero or more
    pub const ANY: Cardinality = Cardinality {
        min: 0,
        max: usize::MAX,
    };
    /// One or more
    pub const AT_LEAST_ONE: Cardinality = Cardinality {
        min: 1,
        max: usize::MAX,
    };

    /// Between `min` and `max` occurrences
    pub const fn between(min: usize, max: usize) -> Self {
        Cardinality { min, max }
    }
}

/// One field of an element
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Logical name, as spelled in the most recent version
    pub name: &'static str,
    /// Where the value is stored
    pub placement: Placement,
    /// Lexical type
    pub kind: FieldKind,
    /// Occurrence bounds
    pub cardinality: Cardinality,
    /// First version with this field
    pub since: Version,
    /// Last version with this field
    pub until: Option<Version>,
    /// Inclusive numeric bounds for doubles
    pub range: Option<(f64, f64)>,
    /// Value assumed when the field is absent
    pub default: Option<&'static str>,
}

impl FieldDescriptor {
    const fn new(name: &'static str, placement: Placement, kind: FieldKind) -> Self {
        Self {
            name,
            placement,
            kind,
            cardinality: Cardinality::OPTIONAL,
            since: Version::V2_0,
            until: None,
            range: None,
            default: None,
        }
    }

    /// An attribute field
    pub const fn attribute(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, Placement::Attribute, kind)
    }

    /// A child-element text field
    pub const fn child_text(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, Placement::ChildText, kind)
    }

    /// The element's own text
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, Placement::Text, FieldKind::Text)
    }

    /// Mark the field as required
    pub const fn required(mut self) -> Self {
        self.cardinality = Cardinality::REQUIRED;
        self
    }

    /// Override the occurrence bounds
    pub const fn occurs(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Field exists from `version`
    pub const fn since(mut self, version: Version) -> Self {
        self.since = version;
        self
    }

    /// Field exists through `version`
    pub const fn until(mut self, version: Version) -> Self {
        self.until = Some(version);
        self
    }

    /// Inclusive numeric range
    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Default value when absent
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// True if the field exists in `version`
    pub fn applies_to(&self, version: Version) -> bool {
        version.is_at_least(self.since) && self.until.map_or(true, |until| version <= until)
    }
}

/// A nested component kind
#[derive(Debug, Clone, Copy)]
pub struct ChildDescriptor {
    /// Descriptor of the nested element
    pub descriptor: &'static ElementDescriptor,
    /// Occurrence bounds
    pub cardinality: Cardinality,
}

impl ChildDescriptor {
    /// Nested component with bounds
    pub const fn new(descriptor: &'static ElementDescriptor, cardinality: Cardinality) -> Self {
        Self {
            descriptor,
            cardinality,
        }
    }
}

/// What an element demands of one of its bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleRequirement {
    /// May be absent
    Optional,
    /// Security attributes with classification and ownerProducer
    Classified,
    /// XLink attributes of type `locator` with an href
    Locator,
    /// SRS attributes with an `srsName`
    SrsName,
}

/// A bundle an element may carry
#[derive(Debug, Clone, Copy)]
pub struct BundleRule {
    /// Bundle kind
    pub kind: BundleKind,
    /// What is required of it
    pub requirement: BundleRequirement,
    /// First version where the element carries it
    pub since: Version,
}

impl BundleRule {
    /// Optional bundle available in every version
    pub const fn optional(kind: BundleKind) -> Self {
        Self {
            kind,
            requirement: BundleRequirement::Optional,
            since: Version::V2_0,
        }
    }

    /// Bundle with a requirement, available in every version
    pub const fn requiring(kind: BundleKind, requirement: BundleRequirement) -> Self {
        Self {
            kind,
            requirement,
            since: Version::V2_0,
        }
    }

    /// Bundle available from `version`
    pub const fn since(mut self, version: Version) -> Self {
        self.since = version;
        self
    }
}

/// Advisory checks run after successful validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningRule {
    /// No field, child or bundle is set
    EmptyElement,
    /// The named field has no value
    NoValue(&'static str),
    /// `field` is set but `companion` is not
    Companion {
        /// The field that is set
        field: &'static str,
        /// The field it needs
        companion: &'static str,
    },
    /// Two nested components of the named kind are equal
    DuplicateChildren(&'static str),
}

/// Extra cross-field check, run after the datatype checks
pub type RuleFn = fn(&Component) -> Result<()>;

/// Everything the engine needs to know about one element type
pub struct ElementDescriptor {
    /// Local element name
    pub name: &'static str,
    /// Fields in XML order
    pub fields: &'static [FieldDescriptor],
    /// Nested components, after all child-text fields
    pub children: &'static [ChildDescriptor],
    /// Bundles the element may carry
    pub bundles: &'static [BundleRule],
    /// Advisory checks
    pub warnings: &'static [WarningRule],
    /// Cross-field check
    pub rules: Option<RuleFn>,
    /// First version with this element
    pub since: Version,
}

impl std::fmt::Debug for ElementDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementDescriptor")
            .field("name", &self.name)
            .field("since", &self.since)
            .finish_non_exhaustive()
    }
}

impl ElementDescriptor {
    /// Field by logical name
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    /// Nested component kind by element name
    pub fn child(&self, name: &str) -> Option<&ChildDescriptor> {
        self.children.iter().find(|c| c.descriptor.name == name)
    }

    /// Bundle rule by kind
    pub fn bundle(&self, kind: BundleKind) -> Option<&BundleRule> {
        self.bundles.iter().find(|b| b.kind == kind)
    }

    /// Version-specific serialized name of a field
    pub fn field_name(&self, field: &FieldDescriptor, version: Version) -> String {
        version
            .name_for(&format!("{}.{}", self.name, field.name))
            .to_string()
    }

    /// Bundle kinds this element reads
    pub fn bundle_kinds(&self) -> Vec<BundleKind> {
        self.bundles.iter().map(|b| b.kind).collect()
    }
}
