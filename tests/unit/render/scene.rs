use super::*;
use crate::{
    foundation::core::Year,
    geometry::ternary::Weights,
    select::{
        frame::{FrameEntry, PlotPoint},
        smooth::Smoothing,
    },
    view::mode::EnergyMode,
};

fn frame(tri: &Triangle) -> Frame {
    let w = Weights::new(0.2, 0.3, 0.5);
    Frame {
        year: Year(2010),
        mode: EnergyMode::Final,
        smoothing: Smoothing::Annual,
        entries: vec![
            FrameEntry {
                entity: "China".to_string(),
                point: Some(PlotPoint {
                    year: Year(2010),
                    weights: w,
                    pos: tri.project(w),
                    total: Some(1500.0),
                    source: Some("IEA".to_string()),
                }),
                trail: vec![
                    tri.project(Weights::new(0.5, 0.1, 0.4)),
                    tri.project(Weights::new(0.3, 0.2, 0.5)),
                    tri.project(w),
                ],
            },
            FrameEntry {
                entity: "World".to_string(),
                point: None,
                trail: vec![tri.project(w)],
            },
        ],
    }
}

fn view() -> ViewState {
    ViewState::initial(&Catalog::builtin())
        .with_selection(["China", "World"])
        .with_year(Year(2010))
}

fn count(svg: &str, needle: &str) -> usize {
    svg.matches(needle).count()
}

#[test]
fn chart_has_grid_edges_ticks_and_title() {
    let cfg = ChartConfig::default();
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let svg = scene.build(&frame(scene.triangle()), &view()).to_svg_string();

    assert!(svg.starts_with("<svg"));
    assert_eq!(count(&svg, r#"class="grid-line""#), 12);
    assert_eq!(count(&svg, r#"class="axis-edge""#), 3);
    assert!(svg.contains("Final energy mix (1900 \u{2013} 2010)"));
    assert!(svg.contains(">Electrons</text>"));
    assert!(svg.contains(">High fossil</text>"));
    assert!(!svg.contains("highlight-band"));
}

#[test]
fn markers_and_trails_use_catalog_colors() {
    let cfg = ChartConfig::default();
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let svg = scene.build(&frame(scene.triangle()), &view()).to_svg_string();

    let china = catalog.color("China").to_hex();
    assert_eq!(count(&svg, r#"class="country-point""#), 1);
    // single-point trails are not drawn
    assert_eq!(count(&svg, r#"class="year-trail""#), 1);
    assert!(svg.contains(&format!(r#"class="year-trail" fill="none" stroke="{china}""#)));
    assert!(svg.contains(&format!(r#"class="country-point" fill="{china}""#)));
    // both selected entities appear in the legend
    assert_eq!(count(&svg, r#"class="legend-dot""#), 2);
}

#[test]
fn highlight_adds_five_bands() {
    let cfg = ChartConfig::default();
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let v = view().with_highlight(Some(Axis::Foss));
    let svg = scene.build(&frame(scene.triangle()), &v).to_svg_string();
    assert_eq!(count(&svg, r#"class="highlight-band""#), 5);
}

#[test]
fn hover_grows_marker_dims_trails_and_shows_tooltip() {
    let cfg = ChartConfig::default();
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let v = view().with_hovered(Some("China".to_string()));
    let svg = scene.build(&frame(scene.triangle()), &v).to_svg_string();

    assert!(svg.contains(r#"r="8" class="country-point""#));
    assert!(svg.contains(r#"stroke-opacity="0.15""#));
    assert!(svg.contains(r#"class="tooltip""#));
    assert!(svg.contains(">China (2010)</text>"));
    assert!(svg.contains(">Total: 1,500 Mtoe</text>"));
    assert!(svg.contains(">Source: IEA</text>"));
}

#[test]
fn power_mode_relabels_corners() {
    let cfg = ChartConfig::default();
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let mut f = frame(scene.triangle());
    f.mode = EnergyMode::Power;
    let svg = scene.build(&f, &view()).to_svg_string();
    assert!(svg.contains(">Wind &amp; Solar</text>"));
    assert!(svg.contains("Power energy mix (1985 \u{2013} 2010)"));
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = ChartConfig::default();
    cfg.point_radius = 0.0;
    assert!(Scene::new(&cfg, &Catalog::builtin()).is_err());
}

#[test]
fn background_alpha_maps_to_document_opacity() {
    let cfg = ChartConfig {
        background_rgba: [10, 20, 30, 51],
        ..ChartConfig::default()
    };
    let catalog = Catalog::builtin();
    let scene = Scene::new(&cfg, &catalog).unwrap();
    let doc = scene.build(&frame(scene.triangle()), &view());
    assert_eq!(doc.background, Some(Rgb8::new(10, 20, 30)));
    assert!((doc.background_opacity - 0.2).abs() < 1e-12);
}
