use super::*;

#[test]
fn year_range_contains_boundaries() {
    let r = YearRange::new(Year(1990), Year(2000)).unwrap();
    assert!(!r.contains(Year(1989)));
    assert!(r.contains(Year(1990)));
    assert!(r.contains(Year(2000)));
    assert!(!r.contains(Year(2001)));
    assert_eq!(r.len_years(), 11);
    assert_eq!(r.clamp(Year(1950)), Year(1990));
    assert_eq!(r.clamp(Year(2050)), Year(2000));
}

#[test]
fn year_range_rejects_inverted_bounds() {
    assert!(YearRange::new(Year(2001), Year(2000)).is_err());
}

#[test]
fn default_config_matches_chart_layout() {
    let cfg = ChartConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.inner_width(), 640.0);
    assert_eq!(cfg.inner_height(), 560.0);
    assert_eq!(cfg.origin(), Vec2::new(80.0, 60.0));
}

#[test]
fn config_rejects_degenerate_margins() {
    let cfg = ChartConfig {
        margin: Edges {
            left: 500.0,
            right: 500.0,
            ..Edges::default()
        },
        ..ChartConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn config_json_fills_defaults() {
    let cfg: ChartConfig = serde_json::from_str(r#"{"canvas":{"width":400,"height":380}}"#).unwrap();
    assert_eq!(cfg.canvas.width, 400);
    assert_eq!(cfg.margin, ChartConfig::default().margin);
    assert_eq!(cfg.point_radius, 6.0);
}

#[test]
fn hex_colors_parse_long_and_short_forms() {
    assert_eq!(Rgb8::from_hex("#2563eb").unwrap(), Rgb8::new(0x25, 0x63, 0xeb));
    assert_eq!(Rgb8::from_hex("#fff").unwrap(), Rgb8::new(255, 255, 255));
    assert_eq!(Rgb8::new(0x0d, 0x94, 0x88).to_hex(), "#0d9488");
    assert!(Rgb8::from_hex("2563eb").is_err());
    assert!(Rgb8::from_hex("#zzzzzz").is_err());
}
