use super::*;

#[test]
fn builtin_has_regions_and_countries() {
    let c = Catalog::builtin();
    assert_eq!(c.names_of(EntityKind::Region).len(), 8);
    assert_eq!(c.names_of(EntityKind::Country).len(), 13);
    assert_eq!(c.len(), 21);
    assert_eq!(c.color("World"), Rgb8::BLACK);
    assert_eq!(c.get("Germany").unwrap().short, "DEU");
    c.validate().unwrap();
}

#[test]
fn display_order_puts_regions_first() {
    let c = Catalog::builtin();
    let order = c.display_order(["United States", "World", "Brazil", "Europe", "Atlantis"]);
    assert_eq!(order, ["Europe", "World", "Brazil", "United States", "Atlantis"]);
}

#[test]
fn names_follow_display_order() {
    let c = Catalog::builtin();
    let names = c.names();
    assert_eq!(names.first(), Some(&"Asia (Total)"));
    assert_eq!(names[8], "Australia");
    assert_eq!(names.last(), Some(&"United States"));
}

#[test]
fn unknown_entities_get_fallback_color() {
    let c = Catalog::builtin();
    assert_eq!(c.color("Atlantis"), FALLBACK_COLOR);
}

#[test]
fn custom_catalog_round_trips_through_json() {
    let json = r##"{
        "entities": {"United Kingdom": {"kind": "country", "color": "#2563eb", "short": "UKR"}},
        "default_selection": ["United Kingdom"]
    }"##;
    let c: Catalog = serde_json::from_str(json).unwrap();
    c.validate().unwrap();
    assert_eq!(c.default_selection(), ["United Kingdom".to_string()]);
    assert_eq!(c.kind("United Kingdom"), Some(EntityKind::Country));
}

#[test]
fn default_selection_must_exist() {
    let c = Catalog::new(BTreeMap::new(), vec!["Nowhere".to_string()]);
    assert!(c.validate().is_err());
}
