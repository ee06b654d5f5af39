//! Concrete DDMS element types
//!
//! Each type is a descriptor table plus a typed wrapper around
//! [`Component`]. Parsing, validation, equality and output all come from the
//! shared engine.

use crate::component::{Component, ElementDescriptor};
use crate::documents::Element;
use crate::error::{Error, Result};

/// Declare a typed wrapper around [`Component`] for one descriptor
#[doc(hidden)]
macro_rules! component_type {
    ($(#[$meta:meta])* $name:ident, $descriptor:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name($crate::component::Component);

        impl $name {
            /// Build from a parsed element, taking the version from its namespace
            pub fn from_element(element: &$crate::documents::Element) -> $crate::error::Result<Self> {
                $crate::component::Component::from_element(&$descriptor, element).map(Self)
            }

            /// Build from a parsed element read as a specific version
            pub fn from_element_as(
                element: &$crate::documents::Element,
                version: $crate::version::Version,
            ) -> $crate::error::Result<Self> {
                $crate::component::Component::from_element_as(&$descriptor, element, version)
                    .map(Self)
            }

            /// Wrap a generic component of this element type
            pub fn from_component(
                component: $crate::component::Component,
            ) -> $crate::error::Result<Self> {
                if std::ptr::eq(component.descriptor(), &$descriptor) {
                    Ok(Self(component))
                } else {
                    Err($crate::error::Error::validation(format!(
                        "Expected a ddms:{} but found a ddms:{}.",
                        $descriptor.name,
                        component.name()
                    )))
                }
            }

            /// The generic component
            pub fn into_component(self) -> $crate::component::Component {
                self.0
            }
        }

        impl $crate::component::DdmsComponent for $name {
            fn component(&self) -> &$crate::component::Component {
                &self.0
            }
        }

        impl From<$name> for $crate::component::Component {
            fn from(value: $name) -> $crate::component::Component {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub mod bounding_box;
pub mod country_code;
pub mod dates;
pub mod description;
pub mod keyword;
pub mod language;
pub mod link;
pub mod postal_address;
pub mod related_resource;
pub mod rights;
pub mod title;
pub mod vertical_extent;

pub use bounding_box::{BoundingBox, BoundingBoxBuilder};
pub use country_code::{CountryCode, CountryCodeBuilder};
pub use dates::{Dates, DatesBuilder};
pub use description::{Description, DescriptionBuilder};
pub use keyword::{Keyword, KeywordBuilder};
pub use language::{Language, LanguageBuilder};
pub use link::{Link, LinkBuilder};
pub use postal_address::{PostalAddress, PostalAddressBuilder};
pub use related_resource::{RelatedResource, RelatedResourceBuilder};
pub use rights::{Rights, RightsBuilder};
pub use title::{Title, TitleBuilder};
pub use vertical_extent::{VerticalExtent, VerticalExtentBuilder};

/// Every element descriptor this crate knows
pub static DESCRIPTORS: &[&ElementDescriptor] = &[
    &bounding_box::BOUNDING_BOX,
    &country_code::COUNTRY_CODE,
    &dates::DATES,
    &description::DESCRIPTION,
    &keyword::KEYWORD,
    &language::LANGUAGE,
    &link::LINK,
    &postal_address::POSTAL_ADDRESS,
    &related_resource::RELATED_RESOURCE,
    &rights::RIGHTS,
    &title::TITLE,
    &vertical_extent::VERTICAL_EXTENT,
];

/// Descriptor for a local element name
pub fn descriptor_for(local_name: &str) -> Option<&'static ElementDescriptor> {
    DESCRIPTORS.iter().copied().find(|d| d.name == local_name)
}

/// Build a generic component from any supported element
pub fn parse_component(element: &Element) -> Result<Component> {
    let descriptor = descriptor_for(element.local_name()).ok_or_else(|| {
        Error::validation(format!(
            "Unsupported element: {}",
            element.qname.qualified()
        ))
    })?;
    Component::from_element(descriptor, element)
}
