//! ddms:postalAddress

use super::country_code::{CountryCode, CountryCodeBuilder, COUNTRY_CODE};
use crate::component::{
    is_blank, Builder, Cardinality, ChildDescriptor, Component, ElementDescriptor,
    FieldDescriptor, FieldKind, Parts, WarningRule,
};
use crate::error::{Error, Result};
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::child_text("street", FieldKind::Text).occurs(Cardinality::between(0, 6)),
    FieldDescriptor::child_text("city", FieldKind::Text),
    FieldDescriptor::child_text("state", FieldKind::Text),
    FieldDescriptor::child_text("province", FieldKind::Text),
    FieldDescriptor::child_text("postalCode", FieldKind::Text),
];

static CHILDREN: &[ChildDescriptor] = &[ChildDescriptor::new(&COUNTRY_CODE, Cardinality::OPTIONAL)];

/// Descriptor for `ddms:postalAddress`
pub static POSTAL_ADDRESS: ElementDescriptor = ElementDescriptor {
    name: "postalAddress",
    fields: FIELDS,
    children: CHILDREN,
    bundles: &[],
    warnings: &[WarningRule::EmptyElement],
    rules: Some(check_state_or_province),
    since: Version::V2_0,
};

fn check_state_or_province(component: &Component) -> Result<()> {
    if component.value("state").is_some() && component.value("province").is_some() {
        return Err(Error::validation("Only 1 of state or province can be used."));
    }
    Ok(())
}

component_type!(
    /// A mailing address
    PostalAddress,
    POSTAL_ADDRESS
);

/// Raw values for [`PostalAddress::new`]
#[derive(Debug, Clone, Default)]
pub struct Address<'a> {
    /// Street lines, at most six
    pub streets: &'a [&'a str],
    /// City
    pub city: Option<&'a str>,
    /// State, exclusive with province
    pub state: Option<&'a str>,
    /// Province, exclusive with state
    pub province: Option<&'a str>,
    /// Postal code
    pub postal_code: Option<&'a str>,
}

impl PostalAddress {
    /// Build from address lines and an optional country code
    pub fn new(
        version: Version,
        address: Address<'_>,
        country_code: Option<CountryCode>,
    ) -> Result<Self> {
        let parts = Parts::new()
            .values("street", address.streets.iter().copied())
            .value_opt("city", address.city)
            .value_opt("state", address.state)
            .value_opt("province", address.province)
            .value_opt("postalCode", address.postal_code)
            .children(country_code.map(Component::from));
        Component::from_parts(&POSTAL_ADDRESS, version, parts).map(Self)
    }

    /// Street lines
    pub fn streets(&self) -> &[String] {
        self.0.values("street")
    }

    /// City
    pub fn city(&self) -> Option<&str> {
        self.0.value("city")
    }

    /// State
    pub fn state(&self) -> Option<&str> {
        self.0.value("state")
    }

    /// Province
    pub fn province(&self) -> Option<&str> {
        self.0.value("province")
    }

    /// Postal code
    pub fn postal_code(&self) -> Option<&str> {
        self.0.value("postalCode")
    }

    /// Country code, if present
    pub fn country_code(&self) -> Option<CountryCode> {
        self.0
            .child(COUNTRY_CODE.name)
            .cloned()
            .and_then(|c| CountryCode::from_component(c).ok())
    }
}

/// Builder for [`PostalAddress`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddressBuilder {
    /// Street lines
    pub streets: Vec<String>,
    /// City
    pub city: Option<String>,
    /// State
    pub state: Option<String>,
    /// Province
    pub province: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country code
    pub country_code: CountryCodeBuilder,
}

impl Builder for PostalAddressBuilder {
    type Target = PostalAddress;

    fn is_empty(&self) -> bool {
        self.streets.iter().all(|s| s.trim().is_empty())
            && is_blank(&self.city)
            && is_blank(&self.state)
            && is_blank(&self.province)
            && is_blank(&self.postal_code)
            && self.country_code.is_empty()
    }

    fn commit(&self, version: Version) -> Result<Option<PostalAddress>> {
        if self.is_empty() {
            return Ok(None);
        }
        let country_code = self.country_code.commit(version)?;
        let parts = Parts::new()
            .values("street", self.streets.iter().cloned())
            .value_opt("city", self.city.clone())
            .value_opt("state", self.state.clone())
            .value_opt("province", self.province.clone())
            .value_opt("postalCode", self.postal_code.clone())
            .children(country_code.map(Component::from));
        Component::from_parts(&POSTAL_ADDRESS, version, parts)
            .map(PostalAddress)
            .map(Some)
    }
}

impl From<&PostalAddress> for PostalAddressBuilder {
    fn from(address: &PostalAddress) -> Self {
        let own = |value: Option<&str>| value.map(str::to_string);
        Self {
            streets: address.streets().to_vec(),
            city: own(address.city()),
            state: own(address.state()),
            province: own(address.province()),
            postal_code: own(address.postal_code()),
            country_code: address
                .country_code()
                .as_ref()
                .map(CountryCodeBuilder::from)
                .unwrap_or_default(),
        }
    }
}
