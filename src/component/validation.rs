//! Validation and warnings
//!
//! [`validate`] runs the checks in a fixed order and stops at the first
//! failure:
//!
//! 1. element name and namespace, including nested DDMS elements
//! 2. required fields and nested components
//! 3. upper occurrence bounds
//! 4. datatypes, ranges and cross-field rules
//! 5. version availability of the element, its fields and its bundles
//! 6. bundle checks
//!
//! Errors are returned without a locator; the caller attaches it.

use super::base::Component;
use super::descriptor::{BundleRequirement, Cardinality, FieldKind, Placement, WarningRule};
use crate::datatypes::{
    canonical_double, date_type, is_valid_uri, parse_boolean, parse_double,
    DATE_TYPES_DESCRIPTION,
};
use crate::error::{Error, Result, ValidationMessage};
use crate::names::is_valid_ncname;

pub(super) fn validate(component: &Component) -> Result<()> {
    check_names(component)?;
    check_required(component)?;
    check_upper_bounds(component)?;
    check_values(component)?;
    check_versions(component)?;
    check_bundles(component)
}

fn check_names(component: &Component) -> Result<()> {
    let descriptor = component.descriptor;
    let version = component.version;
    let namespace = version.ddms_namespace();
    let element = &component.element;

    if !element.qname.matches(namespace, descriptor.name) {
        return Err(Error::validation(format!(
            "Unexpected namespace URI and local name encountered: {}",
            element.qname
        )));
    }

    let known: Vec<String> = descriptor
        .fields
        .iter()
        .filter(|f| f.placement == Placement::ChildText)
        .map(|f| descriptor.field_name(f, version))
        .chain(descriptor.children.iter().map(|c| c.descriptor.name.to_string()))
        .collect();
    for child in &element.children {
        if known.iter().any(|name| *name == child.local_name()) && child.namespace() != namespace {
            return Err(Error::validation(format!(
                "Unexpected namespace URI and local name encountered: {}",
                child.qname
            ))
            .located(&child.qname.qualified()));
        }
    }
    Ok(())
}

fn element_count(count: usize) -> &'static str {
    if count == 1 {
        "element"
    } else {
        "elements"
    }
}

fn check_required(component: &Component) -> Result<()> {
    let descriptor = component.descriptor;
    let version = component.version;

    for (field, values) in component.field_values() {
        if field.applies_to(version) && values.len() < field.cardinality.min {
            return Err(Error::validation(format!(
                "{} is required.",
                descriptor.field_name(field, version)
            )));
        }
    }

    for child in descriptor.children {
        if !version.is_at_least(child.descriptor.since) {
            continue;
        }
        let count = component.children_named(child.descriptor.name).count();
        if count < child.cardinality.min {
            return Err(Error::validation(format!(
                "At least {} ddms:{} {} must exist.",
                child.cardinality.min,
                child.descriptor.name,
                element_count(child.cardinality.min)
            )));
        }
    }
    Ok(())
}

pub(super) fn too_many(name: &str, cardinality: Cardinality) -> Error {
    if cardinality.max == 1 {
        Error::validation(format!("Only 1 {} can exist.", name))
    } else {
        Error::validation(format!(
            "No more than {} {} {} can exist.",
            cardinality.max,
            name,
            element_count(cardinality.max)
        ))
    }
}

fn check_upper_bounds(component: &Component) -> Result<()> {
    let descriptor = component.descriptor;
    for (field, values) in component.field_values() {
        if values.len() > field.cardinality.max {
            return Err(too_many(
                &descriptor.field_name(field, component.version),
                field.cardinality,
            ));
        }
    }
    for child in descriptor.children {
        if component.children_named(child.descriptor.name).count() > child.cardinality.max {
            return Err(too_many(
                &format!("ddms:{}", child.descriptor.name),
                child.cardinality,
            ));
        }
    }
    Ok(())
}

fn check_values(component: &Component) -> Result<()> {
    let descriptor = component.descriptor;
    for (field, values) in component.field_values() {
        let name = descriptor.field_name(field, component.version);
        for value in values {
            match field.kind {
                FieldKind::Text => {}
                FieldKind::Boolean => {
                    if parse_boolean(value).is_none() {
                        return Err(Error::validation(format!(
                            "{} must be a boolean value: {}",
                            name, value
                        )));
                    }
                }
                FieldKind::Double => {
                    let Some(number) = parse_double(value) else {
                        return Err(Error::validation(format!(
                            "{} must be a number: {}",
                            name, value
                        )));
                    };
                    if let Some((min, max)) = field.range {
                        if !(min..=max).contains(&number) {
                            return Err(Error::validation(format!(
                                "{} must be between {} and {}.",
                                name,
                                canonical_double(min),
                                canonical_double(max)
                            )));
                        }
                    }
                }
                FieldKind::Date => {
                    if date_type(value).is_none() {
                        return Err(Error::validation(format!(
                            "The {} date must be in one of the following formats: {}.",
                            name, DATE_TYPES_DESCRIPTION
                        )));
                    }
                }
                FieldKind::Uri => {
                    if !is_valid_uri(value) {
                        return Err(Error::validation(format!(
                            "Invalid URI ({}): {}",
                            name, value
                        )));
                    }
                }
                FieldKind::NcName => {
                    if !is_valid_ncname(value) {
                        return Err(Error::validation(format!(
                            "{} must be an NCName: {}",
                            name, value
                        )));
                    }
                }
                FieldKind::Enumerated(tokens) => {
                    if !tokens.contains(&value.as_str()) {
                        return Err(Error::validation(format!(
                            "{} must be one of the following: {}",
                            name,
                            tokens.join(", ")
                        )));
                    }
                }
            }
        }
    }

    match descriptor.rules {
        Some(rule) => rule(component),
        None => Ok(()),
    }
}

fn check_versions(component: &Component) -> Result<()> {
    let descriptor = component.descriptor;
    let version = component.version;

    if !version.is_at_least(descriptor.since) {
        return Err(Error::validation(format!(
            "The ddms:{} element cannot be used until DDMS {} or later.",
            descriptor.name, descriptor.since
        )));
    }

    for (field, values) in component.field_values() {
        if values.is_empty() || field.applies_to(version) {
            continue;
        }
        let what = match field.placement {
            Placement::Attribute => "attribute",
            _ => "element",
        };
        let name = descriptor.field_name(field, version);
        return Err(match field.until {
            Some(until) if version > until => Error::validation(format!(
                "The {} {} cannot be used after DDMS {}.",
                name, what, until
            )),
            _ => Error::validation(format!(
                "The {} {} cannot be used until DDMS {} or later.",
                name, what, field.since
            )),
        });
    }

    for kind in component.bundles.kinds() {
        if let Some(rule) = descriptor.bundle(kind) {
            if !version.is_at_least(rule.since) {
                return Err(Error::validation(format!(
                    "{} attributes cannot be applied to the ddms:{} element until DDMS {} or later.",
                    kind, descriptor.name, rule.since
                )));
            }
        }
    }
    Ok(())
}

fn check_bundles(component: &Component) -> Result<()> {
    let version = component.version;
    let bundles = &component.bundles;
    bundles.validate(version)?;
    if let Some(extensible) = &bundles.extensible {
        extensible.check_prefixes(&component.element)?;
    }

    for rule in component.descriptor.bundles {
        if !version.is_at_least(rule.since) {
            continue;
        }
        match rule.requirement {
            BundleRequirement::Optional => {}
            BundleRequirement::Classified => match &bundles.security {
                Some(security) => security.require_classification()?,
                None => return Err(Error::validation("classification is required.")),
            },
            BundleRequirement::SrsName => match &bundles.srs {
                Some(srs) => srs.require_name()?,
                None => return Err(Error::validation("srsName is required.")),
            },
            BundleRequirement::Locator => match &bundles.xlink {
                Some(xlink) => xlink.require_locator()?,
                None => {
                    return Err(Error::validation(
                        "The type attribute must have a fixed value of \"locator\".",
                    ))
                }
            },
        }
    }
    Ok(())
}

/// Advisory messages for a valid component, followed by those of its children
pub(super) fn warnings(component: &Component) -> Vec<ValidationMessage> {
    let descriptor = component.descriptor;
    let version = component.version;
    let locator = component.qualified_name();
    let mut messages = Vec::new();

    for rule in descriptor.warnings {
        match *rule {
            WarningRule::EmptyElement => {
                let empty = component.values.iter().all(Vec::is_empty)
                    && component.children.is_empty()
                    && component.bundles.is_empty();
                if empty {
                    messages.push(ValidationMessage::warning(
                        format!("A completely empty ddms:{} element was found.", descriptor.name),
                        &locator,
                    ));
                }
            }
            WarningRule::NoValue(field) => {
                if component.value(field).is_none() {
                    messages.push(ValidationMessage::warning(
                        format!("A ddms:{} element was found with no value.", descriptor.name),
                        &locator,
                    ));
                }
            }
            WarningRule::Companion { field, companion } => {
                if component.value(field).is_some() && component.value(companion).is_none() {
                    let name = |logical: &str| {
                        descriptor
                            .field(logical)
                            .map(|(_, f)| descriptor.field_name(f, version))
                            .unwrap_or_else(|| logical.to_string())
                    };
                    messages.push(ValidationMessage::warning(
                        format!(
                            "A {} has been set without an accompanying {} attribute.",
                            name(field),
                            name(companion)
                        ),
                        &locator,
                    ));
                }
            }
            WarningRule::DuplicateChildren(child) => {
                let siblings: Vec<&Component> = component.children_named(child).collect();
                let duplicated = siblings
                    .iter()
                    .enumerate()
                    .any(|(i, a)| siblings[i + 1..].iter().any(|b| a == b));
                if duplicated {
                    messages.push(ValidationMessage::warning(
                        format!("1 or more {}s have the same value.", child),
                        &locator,
                    ));
                }
            }
        }
    }

    for child in &component.children {
        messages.extend(
            child
                .warnings
                .iter()
                .cloned()
                .map(|w| w.with_parent(&locator)),
        );
    }
    messages
}

/// True if the component carries a "no value" warning of its own
pub(super) fn flagged_no_value(component: &Component) -> bool {
    let own = component.qualified_name();
    let text = format!(
        "A ddms:{} element was found with no value.",
        component.descriptor.name
    );
    component
        .warnings
        .iter()
        .any(|w| w.locator == own && w.text == text)
}
