use super::*;
use crate::{foundation::core::Year, geometry::ternary::Weights, select::smooth::Smoothing};

fn point(x: f64, y: f64) -> PlotPoint {
    PlotPoint {
        year: Year(2010),
        weights: Weights::new(0.123, 0.2, 0.677),
        pos: Point::new(x, y),
        total: Some(1234.5),
        source: Some("IEA".to_string()),
    }
}

fn frame() -> Frame {
    Frame {
        year: Year(2012),
        mode: EnergyMode::Final,
        smoothing: Smoothing::Annual,
        entries: vec![
            crate::select::frame::FrameEntry {
                entity: "China".to_string(),
                point: Some(point(10.0, 10.0)),
                trail: vec![],
            },
            crate::select::frame::FrameEntry {
                entity: "India".to_string(),
                point: Some(point(14.0, 10.0)),
                trail: vec![],
            },
            crate::select::frame::FrameEntry {
                entity: "Japan".to_string(),
                point: None,
                trail: vec![Point::new(13.0, 10.0), Point::new(13.0, 11.0)],
            },
        ],
    }
}

#[test]
fn consumption_tooltip_rows() {
    let t = Tooltip::for_point("China", &point(0.0, 0.0), EnergyMode::Final);
    assert_eq!(t.title, "China (2010)");
    assert_eq!(t.rows[0], ("Electricity".to_string(), "20.0%".to_string()));
    assert_eq!(t.rows[1], ("Fossil Fuels".to_string(), "67.7%".to_string()));
    assert_eq!(t.rows[2], ("Bio and other".to_string(), "12.3%".to_string()));
    assert_eq!(t.rows[3], ("Total".to_string(), "1,234.5 Mtoe".to_string()));
    assert_eq!(t.lines().last().map(String::as_str), Some("Source: IEA"));
}

#[test]
fn power_tooltip_uses_generation_labels() {
    let t = Tooltip::for_point("China", &point(0.0, 0.0), EnergyMode::Power);
    assert_eq!(t.rows[0].0, "Wind & Solar");
    assert_eq!(t.rows[2].0, "Other (Hydro/Bio/Nuc)");
    assert_eq!(t.rows[3], ("Total Generation".to_string(), "1,234.5 TWh".to_string()));
}

#[test]
fn hit_test_picks_nearest_marker_in_radius() {
    let f = frame();
    assert_eq!(hit_test(&f, Point::new(11.0, 10.0), 6.0), Some("China"));
    assert_eq!(hit_test(&f, Point::new(13.0, 10.0), 6.0), Some("India"));
    assert_eq!(hit_test(&f, Point::new(40.0, 40.0), 6.0), None);
}

#[test]
fn thousands_grouping() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(1234567.891), "1,234,567.89");
    assert_eq!(group_thousands(-2500.5), "-2,500.5");
}
