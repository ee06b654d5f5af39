//! Lexical checks and canonical forms for the simple types DDMS uses
//!
//! Values are kept as strings on components; these helpers decide whether a
//! string is acceptable and what its canonical form is.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// =============================================================================
// Dates
// =============================================================================

/// XSD date types accepted by DDMS date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateType {
    /// xs:dateTime
    DateTime,
    /// xs:date
    Date,
    /// xs:gYearMonth
    GYearMonth,
    /// xs:gYear
    GYear,
}

impl DateType {
    /// XSD type name
    pub fn as_str(&self) -> &'static str {
        match self {
            DateType::DateTime => "xs:dateTime",
            DateType::Date => "xs:date",
            DateType::GYearMonth => "xs:gYearMonth",
            DateType::GYear => "xs:gYear",
        }
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human readable list of the accepted date types, for error messages
pub const DATE_TYPES_DESCRIPTION: &str = "xs:dateTime, xs:date, xs:gYearMonth, or xs:gYear";

const TZ: &str = r"(Z|[+-](?:(?:0\d|1[0-3]):[0-5]\d|14:00))?";

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(-?\d{{4,}})-(\d{{2}})-(\d{{2}})T(\d{{2}}):(\d{{2}}):(\d{{2}})(\.\d+)?{}$",
        TZ
    ))
    .unwrap()
});

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?\d{{4,}})-(\d{{2}})-(\d{{2}}){}$", TZ)).unwrap());

static G_YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?\d{{4,}})-(\d{{2}}){}$", TZ)).unwrap());

static G_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-?\d{{4,}}){}$", TZ)).unwrap());

fn number<T: std::str::FromStr>(caps: &regex::Captures<'_>, i: usize) -> Option<T> {
    caps.get(i).and_then(|m| m.as_str().parse().ok())
}

fn valid_date(caps: &regex::Captures<'_>) -> bool {
    match (number::<i32>(caps, 1), number(caps, 2), number(caps, 3)) {
        (Some(y), Some(m), Some(d)) => y != 0 && NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

/// Determine which accepted date type a value has, if any
pub fn date_type(value: &str) -> Option<DateType> {
    if let Some(caps) = DATE_TIME.captures(value) {
        let time = match (number(&caps, 4), number(&caps, 5), number(&caps, 6)) {
            (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(h, m, s).is_some(),
            _ => false,
        };
        return (valid_date(&caps) && time).then_some(DateType::DateTime);
    }
    if let Some(caps) = DATE.captures(value) {
        return valid_date(&caps).then_some(DateType::Date);
    }
    if let Some(caps) = G_YEAR_MONTH.captures(value) {
        let ok = matches!(number::<i32>(&caps, 1), Some(y) if y != 0)
            && matches!(number::<u32>(&caps, 2), Some(1..=12));
        return ok.then_some(DateType::GYearMonth);
    }
    if let Some(caps) = G_YEAR.captures(value) {
        return matches!(number::<i32>(&caps, 1), Some(y) if y != 0).then_some(DateType::GYear);
    }
    None
}

/// True for an xs:date value
pub fn is_xs_date(value: &str) -> bool {
    date_type(value) == Some(DateType::Date)
}

// =============================================================================
// URIs
// =============================================================================

/// True if `value` is an absolute URI or a well-formed relative reference
pub fn is_valid_uri(value: &str) -> bool {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if value.chars().any(|c| matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')) {
        return false;
    }
    match url::Url::parse(value) {
        Ok(_) => true,
        // a relative reference may not have a colon in its first segment
        Err(url::ParseError::RelativeUrlWithoutBase) => value
            .split(['/', '?', '#'])
            .next()
            .map_or(true, |segment| !segment.contains(':')),
        Err(_) => false,
    }
}

// =============================================================================
// Numbers and booleans
// =============================================================================

/// Parse an xs:double
pub fn parse_double(value: &str) -> Option<f64> {
    match value.trim() {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other if other.contains(['i', 'I', 'n', 'N']) => None,
        other => other.parse().ok(),
    }
}

/// Canonical string for a double: `12`, `-45.5`
pub fn canonical_double(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Parse an xs:boolean
pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_types() {
        assert_eq!(date_type("2003-02-15T10:00:00Z"), Some(DateType::DateTime));
        assert_eq!(date_type("2003-02-15T10:00:00.5-05:00"), Some(DateType::DateTime));
        assert_eq!(date_type("2003-02-15"), Some(DateType::Date));
        assert_eq!(date_type("2003-02"), Some(DateType::GYearMonth));
        assert_eq!(date_type("2003"), Some(DateType::GYear));
        assert_eq!(date_type("2003Z"), Some(DateType::GYear));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(date_type("---31"), None);
        assert_eq!(date_type("2003-02-30"), None);
        assert_eq!(date_type("2003-13"), None);
        assert_eq!(date_type("0000"), None);
        assert_eq!(date_type("2003-02-15T25:00:00"), None);
        assert_eq!(date_type("15 February 2003"), None);
        assert_eq!(date_type(""), None);
    }

    #[test]
    fn test_is_xs_date() {
        assert!(is_xs_date("2005-10-10"));
        assert!(!is_xs_date("2005-10"));
    }

    #[test]
    fn test_uris() {
        assert!(is_valid_uri("http://en.wikipedia.org/wiki/Tank"));
        assert!(is_valid_uri("urn:isbn:0123456789"));
        assert!(is_valid_uri("relative/path#frag"));
        assert!(!is_valid_uri(":::::"));
        assert!(!is_valid_uri("has space"));
        assert!(!is_valid_uri(""));
    }

    #[test]
    fn test_doubles() {
        assert_eq!(parse_double("12.0"), Some(12.0));
        assert_eq!(parse_double(" -45.5 "), Some(-45.5));
        assert_eq!(parse_double("abc"), None);
        assert_eq!(parse_double("inf"), None);
        assert_eq!(canonical_double(12.0), "12");
        assert_eq!(canonical_double(-0.0), "0");
        assert_eq!(canonical_double(1.25), "1.25");
    }

    #[test]
    fn test_booleans() {
        assert_eq!(parse_boolean("true"), Some(true));
        assert_eq!(parse_boolean("0"), Some(false));
        assert_eq!(parse_boolean("yes"), None);
    }
}
