//! Element-level behaviour through the public API: version gating,
//! cardinality, value checks and output paths.

use ddms::config::{IndexLevel, OutputConfig};
use ddms::documents::Document;
use ddms::elements::postal_address::Address;
use ddms::elements::*;
use ddms::{Component, DdmsComponent, OutputFormat, Version};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse(xml: &str) -> ddms::documents::Element {
    Document::from_string(xml).unwrap().into_root().unwrap()
}

// ===== Version gating =====

#[test]
fn test_approved_on_gating() {
    let xml = r#"<ddms:dates xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/" ddms:approvedOn="2010"/>"#;
    let err = Dates::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains("cannot be used until DDMS 3.1 or later"));

    let xml = r#"<ddms:dates xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.1/" ddms:approvedOn="2010"/>"#;
    assert_eq!(
        Dates::from_element(&parse(xml)).unwrap().approved_on(),
        Some("2010")
    );
}

#[test]
fn test_keyword_extensible_gating() {
    let xml = r#"<ddms:keyword xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/2.0/"
        xmlns:ex="http://example.com/" ddms:value="Tank" ex:score="1"/>"#;
    let err = Keyword::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains(
        "Extensible attributes cannot be applied to the ddms:keyword element until DDMS 3.0 or later."
    ));

    let xml = r#"<ddms:keyword xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/"
        xmlns:ex="http://example.com/" ddms:value="Tank" ex:score="1"/>"#;
    let keyword = Keyword::from_element(&parse(xml)).unwrap();
    assert_eq!(
        keyword
            .extensible_attributes()
            .and_then(|e| e.get("http://example.com/", "score")),
        Some("1")
    );
}

#[test]
fn test_security_attribute_gating() {
    let security = ddms::SecurityAttributes::new(
        Some("U"),
        &["USA"],
        &[("declassManualReview", "true")],
    );
    assert!(Title::new(Version::V2_0, "Tank Survey", security.clone()).is_ok());
    let err = Title::new(Version::V3_0, "Tank Survey", security).unwrap_err();
    assert!(err
        .to_string()
        .contains("The declassManualReview attribute cannot be used after DDMS 2.0."));
}

// ===== Cardinality =====

#[test]
fn test_duplicate_single_field() {
    let xml = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:5">
        <ddms:westBL>1</ddms:westBL><ddms:westBL>2</ddms:westBL>
        <ddms:eastBL>2</ddms:eastBL><ddms:southBL>3</ddms:southBL><ddms:northBL>4</ddms:northBL>
    </ddms:boundingBox>"#;
    let err = BoundingBox::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains("Only 1 westBL can exist."));
}

#[test]
fn test_duplicate_child_component() {
    let xml = r#"<ddms:postalAddress xmlns:ddms="urn:us:mil:ces:metadata:ddms:5">
        <ddms:countryCode ddms:codespace="ISO-3166" ddms:code="USA"/>
        <ddms:countryCode ddms:codespace="ISO-3166" ddms:code="CAN"/>
    </ddms:postalAddress>"#;
    let err = PostalAddress::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains("Only 1 ddms:countryCode can exist."));
}

// ===== Values =====

#[test]
fn test_bounding_box_limits() {
    assert!(BoundingBox::new(Version::V5_0, 200.0, 0.0, 0.0, 0.0).is_err());
    assert!(BoundingBox::new(Version::V5_0, -120.0, 120.0, 0.0, 0.0).is_ok());
    assert!(BoundingBox::new(Version::V5_0, 0.0, 0.0, 90.5, 0.0).is_err());
    assert!(BoundingBox::new(Version::V5_0, 180.0, -180.0, -90.0, 90.0).is_ok());
}

#[test]
fn test_not_a_number() {
    let xml = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:5">
        <ddms:westBL>west</ddms:westBL><ddms:eastBL>2</ddms:eastBL>
        <ddms:southBL>3</ddms:southBL><ddms:northBL>4</ddms:northBL>
    </ddms:boundingBox>"#;
    let err = BoundingBox::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains("westBL must be a number: west"));
}

#[test]
fn test_number_lexical_forms_compare_equal() {
    let a = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:5">
        <ddms:westBL>1.0</ddms:westBL><ddms:eastBL>2</ddms:eastBL>
        <ddms:southBL>3</ddms:southBL><ddms:northBL>4</ddms:northBL>
    </ddms:boundingBox>"#;
    let b = BoundingBox::new(Version::V5_0, 1.0, 2.0, 3.0, 4.0).unwrap();
    assert_eq!(BoundingBox::from_element(&parse(a)).unwrap(), b);
}

#[test]
fn test_boolean_lexical_forms_compare_equal() {
    let xml = r#"<ddms:rights xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:privacyAct="1" ddms:copyright="0"/>"#;
    let rights = Rights::from_element(&parse(xml)).unwrap();
    assert_eq!(rights, Rights::new(Version::V5_0, true, false, false).unwrap());
}

#[test]
fn test_relationship_must_be_uri() {
    let xml = r#"<ddms:relatedResource xmlns:ddms="urn:us:mil:ces:metadata:ddms:5"
        xmlns:xlink="http://www.w3.org/1999/xlink"
        ddms:relationship="not a uri" ddms:qualifier="urn:q" ddms:value="v">
        <ddms:link xlink:type="locator" xlink:href="urn:x"/>
    </ddms:relatedResource>"#;
    let err = RelatedResource::from_element(&parse(xml)).unwrap_err();
    assert!(err.to_string().contains("Invalid URI (relationship)"));
}

#[test]
fn test_nested_link_parsed() {
    let xml = r#"<ddms:relatedResource xmlns:ddms="urn:us:mil:ces:metadata:ddms:4"
        xmlns:xlink="http://www.w3.org/1999/xlink"
        ddms:relationship="urn:r" ddms:qualifier="urn:q" ddms:value="v">
        <ddms:link xlink:type="locator" xlink:href="urn:x" xlink:label="first"/>
    </ddms:relatedResource>"#;
    let resource = RelatedResource::from_element(&parse(xml)).unwrap();
    assert_eq!(resource.version(), Version::V4_1);
    let links = resource.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].xlink_attributes().and_then(|x| x.label()), Some("first"));

    let err = RelatedResource::from_element_as(
        &parse(&xml.replace("xlink:label=\"first\"", "xlink:label=\"1st\"")),
        Version::V4_0_1,
    )
    .unwrap_err();
    assert!(err.to_string().contains("ddms:relatedResource.ddms:link"));
}

// ===== Output =====

fn address() -> PostalAddress {
    PostalAddress::new(
        Version::V5_0,
        Address {
            streets: &["1 Main St", "Suite 2"],
            city: Some("Springfield"),
            province: Some("Ontario"),
            ..Default::default()
        },
        None,
    )
    .unwrap()
}

#[test]
fn test_repeated_fields_index_when_plural() {
    let config = OutputConfig::default().with_index_level(IndexLevel::WhenPlural);
    let text = address().render(OutputFormat::Text, config).unwrap();
    assert_eq!(
        text,
        "postalAddress.street[1]: 1 Main St\n\
         postalAddress.street[2]: Suite 2\n\
         postalAddress.city: Springfield\n\
         postalAddress.province: Ontario\n"
    );
}

#[test]
fn test_repeated_fields_never_indexed_by_default() {
    let text = address()
        .render(OutputFormat::Text, OutputConfig::default())
        .unwrap();
    assert!(text.starts_with("postalAddress.street: 1 Main St\npostalAddress.street: Suite 2\n"));
}

#[test]
fn test_html_escapes_values() {
    let keyword = Keyword::new(Version::V5_0, "Fish & \"Chips\"", None, None).unwrap();
    assert_eq!(
        keyword.to_html().unwrap(),
        "<meta name=\"keyword.value\" content=\"Fish &amp; &quot;Chips&quot;\" />\n"
    );
}

#[test]
fn test_json_nested_bundles() {
    let config = OutputConfig::default().with_json_inline_attributes(false);
    let title = Title::new(
        Version::V5_0,
        "Tank Survey",
        ddms::SecurityAttributes::new(Some("U"), &["USA", "GBR"], &[]),
    )
    .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&title.render(OutputFormat::Json, config).unwrap()).unwrap();
    assert_eq!(json["title"], "Tank Survey");
    assert_eq!(
        json["securityAttributes"]["ownerProducer"],
        serde_json::json!(["USA", "GBR"])
    );
    assert!(json.get("classification").is_none());
}

#[test]
fn test_json_arrays_and_numbers() {
    let json: serde_json::Value = serde_json::from_str(&address().to_json().unwrap()).unwrap();
    assert_eq!(json["street"], serde_json::json!(["1 Main St", "Suite 2"]));

    let bounds = BoundingBox::new(Version::V5_0, -1.5, 1.5, 0.0, 2.0).unwrap();
    let json: serde_json::Value = serde_json::from_str(&bounds.to_json().unwrap()).unwrap();
    assert_eq!(json["westBL"], serde_json::json!(-1.5));
}

#[test]
fn test_generic_parse_matches_typed() {
    let xml = r#"<ddms:language xmlns:ddms="urn:us:mil:ces:metadata:ddms:5" ddms:qualifier="ISO-639" ddms:value="fr"/>"#;
    let generic: Component = parse_component(&parse(xml)).unwrap();
    let typed = Language::from_element(&parse(xml)).unwrap();
    assert_eq!(Language::from_component(generic).unwrap(), typed);
}

// ===== Properties =====

proptest! {
    #[test]
    fn prop_longitudes_in_range_accepted(west in -180.0f64..=180.0, east in -180.0f64..=180.0) {
        let bounds = BoundingBox::new(Version::V5_0, west, east, 0.0, 0.0).unwrap();
        prop_assert_eq!(bounds.west(), west);
        prop_assert_eq!(bounds.east(), east);
    }

    #[test]
    fn prop_longitudes_out_of_range_rejected(west in 180.001f64..1.0e6) {
        prop_assert!(BoundingBox::new(Version::V5_0, west, 0.0, 0.0, 0.0).is_err());
        prop_assert!(BoundingBox::new(Version::V5_0, -west, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn prop_latitudes_round_trip(south in -90.0f64..=90.0, north in -90.0f64..=90.0) {
        let bounds = BoundingBox::new(Version::V3_1, 0.0, 0.0, south, north).unwrap();
        let reparsed = BoundingBox::from_element(
            &Document::from_string(&bounds.to_xml().unwrap()).unwrap().into_root().unwrap(),
        )
        .unwrap();
        prop_assert_eq!(reparsed, bounds);
    }
}
