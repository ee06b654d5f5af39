//! ddms:dates

use crate::component::{
    is_blank, Builder, Component, ElementDescriptor, FieldDescriptor, FieldKind, Parts,
    WarningRule,
};
use crate::error::Result;
use crate::version::Version;

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::attribute("created", FieldKind::Date),
    FieldDescriptor::attribute("posted", FieldKind::Date),
    FieldDescriptor::attribute("validTil", FieldKind::Date),
    FieldDescriptor::attribute("infoCutOff", FieldKind::Date),
    FieldDescriptor::attribute("approvedOn", FieldKind::Date).since(Version::V3_1),
    FieldDescriptor::attribute("receivedOn", FieldKind::Date).since(Version::V4_0_1),
];

/// Descriptor for `ddms:dates`
pub static DATES: ElementDescriptor = ElementDescriptor {
    name: "dates",
    fields: FIELDS,
    children: &[],
    bundles: &[],
    warnings: &[WarningRule::EmptyElement],
    rules: None,
    since: Version::V2_0,
};

component_type!(
    /// Lifecycle dates of a resource
    Dates,
    DATES
);

impl Dates {
    /// Build from optional date strings
    pub fn new(
        version: Version,
        created: Option<&str>,
        posted: Option<&str>,
        valid_til: Option<&str>,
        info_cut_off: Option<&str>,
        approved_on: Option<&str>,
        received_on: Option<&str>,
    ) -> Result<Self> {
        let parts = Parts::new()
            .value_opt("created", created)
            .value_opt("posted", posted)
            .value_opt("validTil", valid_til)
            .value_opt("infoCutOff", info_cut_off)
            .value_opt("approvedOn", approved_on)
            .value_opt("receivedOn", received_on);
        Component::from_parts(&DATES, version, parts).map(Self)
    }

    /// Creation date
    pub fn created(&self) -> Option<&str> {
        self.0.value("created")
    }

    /// Posting date
    pub fn posted(&self) -> Option<&str> {
        self.0.value("posted")
    }

    /// Expiration date
    pub fn valid_til(&self) -> Option<&str> {
        self.0.value("validTil")
    }

    /// Information cut-off date
    pub fn info_cut_off(&self) -> Option<&str> {
        self.0.value("infoCutOff")
    }

    /// Approval date (3.1 and later)
    pub fn approved_on(&self) -> Option<&str> {
        self.0.value("approvedOn")
    }

    /// Receipt date (4.0.1 and later)
    pub fn received_on(&self) -> Option<&str> {
        self.0.value("receivedOn")
    }
}

/// Builder for [`Dates`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatesBuilder {
    /// Creation date
    pub created: Option<String>,
    /// Posting date
    pub posted: Option<String>,
    /// Expiration date
    pub valid_til: Option<String>,
    /// Information cut-off date
    pub info_cut_off: Option<String>,
    /// Approval date
    pub approved_on: Option<String>,
    /// Receipt date
    pub received_on: Option<String>,
}

impl Builder for DatesBuilder {
    type Target = Dates;

    fn is_empty(&self) -> bool {
        [
            &self.created,
            &self.posted,
            &self.valid_til,
            &self.info_cut_off,
            &self.approved_on,
            &self.received_on,
        ]
        .into_iter()
        .all(is_blank)
    }

    fn commit(&self, version: Version) -> Result<Option<Dates>> {
        if self.is_empty() {
            return Ok(None);
        }
        Dates::new(
            version,
            self.created.as_deref(),
            self.posted.as_deref(),
            self.valid_til.as_deref(),
            self.info_cut_off.as_deref(),
            self.approved_on.as_deref(),
            self.received_on.as_deref(),
        )
        .map(Some)
    }
}

impl From<&Dates> for DatesBuilder {
    fn from(dates: &Dates) -> Self {
        let own = |value: Option<&str>| value.map(str::to_string);
        Self {
            created: own(dates.created()),
            posted: own(dates.posted()),
            valid_til: own(dates.valid_til()),
            info_cut_off: own(dates.info_cut_off()),
            approved_on: own(dates.approved_on()),
            received_on: own(dates.received_on()),
        }
    }
}
