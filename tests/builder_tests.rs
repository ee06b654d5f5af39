//! Builder lifecycle tests: emptiness, idempotent commits, round trips and
//! explicit list growth.

use ddms::bundles::{SecurityAttributes, SecurityAttributesBuilder, XLinkAttributes};
use ddms::elements::related_resource::Relation;
use ddms::elements::*;
use ddms::{Builder, BuilderList, Version};

fn unclassified() -> SecurityAttributes {
    SecurityAttributes::new(Some("U"), &["USA"], &[])
}

#[test]
fn test_fresh_builders_are_empty() {
    assert!(RightsBuilder::default().is_empty());
    assert!(DatesBuilder::default().is_empty());
    assert!(BoundingBoxBuilder::default().is_empty());
    assert!(VerticalExtentBuilder::default().is_empty());
    assert!(TitleBuilder::default().is_empty());
    assert!(DescriptionBuilder::default().is_empty());
    assert!(LanguageBuilder::default().is_empty());
    assert!(KeywordBuilder::default().is_empty());
    assert!(CountryCodeBuilder::default().is_empty());
    assert!(PostalAddressBuilder::default().is_empty());
    assert!(LinkBuilder::default().is_empty());
    assert!(RelatedResourceBuilder::default().is_empty());
}

#[test]
fn test_empty_builders_commit_to_none() {
    for version in Version::ALL {
        assert!(RightsBuilder::default().commit(version).unwrap().is_none());
        assert!(TitleBuilder::default().commit(version).unwrap().is_none());
        assert!(PostalAddressBuilder::default().commit(version).unwrap().is_none());
        assert!(LinkBuilder::default().commit(version).unwrap().is_none());
    }
}

#[test]
fn test_blank_strings_count_as_empty() {
    let builder = LanguageBuilder {
        qualifier: Some("   ".into()),
        value: Some(String::new()),
    };
    assert!(builder.is_empty());
    assert!(builder.commit(Version::V5_0).unwrap().is_none());
}

#[test]
fn test_nested_emptiness() {
    let mut builder = PostalAddressBuilder::default();
    builder.streets.push(" ".into());
    assert!(builder.is_empty());

    builder.country_code.value = Some("USA".into());
    assert!(!builder.is_empty());

    let mut resource = RelatedResourceBuilder::default();
    resource.links.ensure_capacity(3);
    assert_eq!(resource.links.len(), 3);
    assert!(resource.is_empty());
}

#[test]
fn test_commit_is_idempotent() {
    let builder = TitleBuilder {
        title: Some("Tank Survey".into()),
        security: SecurityAttributesBuilder::from(&unclassified()),
    };
    let first = builder.commit(Version::V5_0).unwrap();
    let second = builder.commit(Version::V5_0).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_failed_commit_keeps_fields() {
    let mut builder = BoundingBoxBuilder {
        west: Some(200.0),
        east: Some(10.0),
        south: Some(-10.0),
        north: Some(10.0),
    };
    let err = builder.commit(Version::V5_0).unwrap_err();
    assert!(err.to_string().contains("westBL"));
    assert_eq!(builder.east, Some(10.0));

    builder.west = Some(-10.0);
    let bounds = builder.commit(Version::V5_0).unwrap().unwrap();
    assert_eq!(bounds.west(), -10.0);
}

#[test]
fn test_round_trip_through_builder() {
    for version in Version::ALL {
        let rights = Rights::new(version, false, true, false).unwrap();
        assert_eq!(RightsBuilder::from(&rights).commit(version).unwrap(), Some(rights));

        let dates = Dates::new(version, Some("2012-01"), None, None, Some("2012"), None, None)
            .unwrap();
        assert_eq!(DatesBuilder::from(&dates).commit(version).unwrap(), Some(dates));

        let extent = VerticalExtent::new(version, 1.5, 2.5, "Foot", "HAE").unwrap();
        assert_eq!(
            VerticalExtentBuilder::from(&extent).commit(version).unwrap(),
            Some(extent)
        );

        let description = Description::new(version, "", unclassified()).unwrap();
        assert_eq!(
            DescriptionBuilder::from(&description).commit(version).unwrap(),
            Some(description)
        );

        let language = Language::new(version, Some("ISO-639"), Some("en")).unwrap();
        assert_eq!(LanguageBuilder::from(&language).commit(version).unwrap(), Some(language));
    }
}

#[test]
fn test_rights_all_false_is_not_empty() {
    let rights = Rights::new(Version::V5_0, false, false, false).unwrap();
    let builder = RightsBuilder::from(&rights);
    assert!(!builder.is_empty());
    assert_eq!(builder.commit(Version::V5_0).unwrap(), Some(rights));
}

#[test]
fn test_builder_targets_another_version() {
    let code = CountryCode::new(Version::V4_1, "ISO-3166", "USA").unwrap();
    let moved = CountryCodeBuilder::from(&code)
        .commit(Version::V5_0)
        .unwrap()
        .unwrap();
    assert_eq!(moved.qualifier(), "ISO-3166");
    assert_ne!(moved, code);
}

#[test]
fn test_builder_list_entries() {
    let mut builder = RelatedResourceBuilder {
        relationship: Some("http://purl.org/dc/terms/references".into()),
        qualifier: Some("http://purl.org/dc/terms/URI".into()),
        value: Some("http://en.wikipedia.org/wiki/Tank".into()),
        ..Default::default()
    };

    // reading past the end never grows the list
    assert!(builder.links.get(1).is_none());
    assert_eq!(builder.links.len(), 0);

    let second = builder.links.entry(1);
    second.xlink.link_type = Some("locator".into());
    second.xlink.href = Some("urn:b".into());
    assert_eq!(builder.links.len(), 2);

    let resource = builder.commit(Version::V5_0).unwrap().unwrap();
    assert_eq!(resource.links().len(), 1);
    assert_eq!(
        resource.links()[0].xlink_attributes().and_then(|x| x.href()),
        Some("urn:b")
    );
}

#[test]
fn test_builder_list_from_components() {
    let links: Vec<Link> = ["urn:a", "urn:b"]
        .iter()
        .map(|href| {
            Link::new(Version::V5_0, XLinkAttributes::locator(href, None, None, None), None).unwrap()
        })
        .collect();
    let list: BuilderList<LinkBuilder> = links.iter().map(LinkBuilder::from).collect::<Vec<_>>().into();
    assert_eq!(list.len(), 2);
    assert_eq!(list.commit_all(Version::V5_0).unwrap(), links);

    let resource = RelatedResource::new(
        Version::V5_0,
        Relation {
            relationship: "http://purl.org/dc/terms/references",
            direction: None,
            qualifier: "http://purl.org/dc/terms/URI",
            value: "urn:tank",
        },
        links,
        None,
    )
    .unwrap();
    assert!(resource.direction().is_none());
}
