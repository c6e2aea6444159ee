use super::*;

fn approx(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn corners_project_onto_themselves() {
    let tri = Triangle::from_width(640.0);
    assert_eq!(tri.project(Weights::new(1.0, 0.0, 0.0)), tri.bio);
    assert_eq!(tri.project(Weights::new(0.0, 1.0, 0.0)), tri.elec);
    assert_eq!(tri.project(Weights::new(0.0, 0.0, 1.0)), tri.foss);
}

#[test]
fn fossil_corner_sits_at_midpoint_and_full_height() {
    let tri = Triangle::from_width(640.0);
    assert_eq!(tri.foss.x, 320.0);
    assert!((tri.height() - 640.0 * 3f64.sqrt() / 2.0).abs() < 1e-9);
    assert_eq!(tri.width(), 640.0);
}

#[test]
fn unit_sum_weights_stay_inside() {
    let tri = Triangle::from_width(100.0);
    let steps = 10;
    for i in 0..=steps {
        for j in 0..=(steps - i) {
            let bio = f64::from(i) / f64::from(steps);
            let elec = f64::from(j) / f64::from(steps);
            let w = Weights::new(bio, elec, 1.0 - bio - elec);
            assert!(tri.contains(tri.project(w)), "{w:?} projected outside");
        }
    }
}

#[test]
fn non_normalized_weights_are_projected_as_is() {
    let tri = Triangle::from_width(100.0);
    let p = tri.project(Weights::new(0.0, 2.0, 0.0));
    assert_eq!(p, Point::new(200.0, 0.0));
    assert!(!tri.contains(p));
}

#[test]
fn unproject_inverts_project() {
    let tri = Triangle::from_width(640.0);
    let w = Weights::new(0.25, 0.15, 0.6);
    let back = tri.unproject(tri.project(w));
    assert!((back.bio - w.bio).abs() < 1e-9);
    assert!((back.elec - w.elec).abs() < 1e-9);
    assert!((back.foss - w.foss).abs() < 1e-9);
}

#[test]
fn grid_lines_end_on_the_triangle_edges() {
    let tri = Triangle::from_width(300.0);
    for axis in Axis::ALL {
        let lines = tri.grid_lines(axis);
        assert_eq!(lines.len(), GRID_LEVELS.len());
        for (line, t) in lines.iter().zip(GRID_LEVELS) {
            assert!(tri.contains(line.p0));
            assert!(tri.contains(line.p1));
            assert!((tri.unproject(line.p0).component(axis) - t).abs() < 1e-9);
            assert!((tri.unproject(line.p1).component(axis) - t).abs() < 1e-9);
        }
    }
}

#[test]
fn ticks_run_corner_to_corner() {
    let tri = Triangle::from_width(300.0);
    let bio = tri.ticks(Axis::Bio);
    assert_eq!(bio.len(), 6);
    assert!(approx(bio[0].pos, tri.foss));
    assert!(approx(bio[5].pos, tri.bio));
    assert_eq!(bio.iter().map(|t| t.pct).collect::<Vec<_>>(), [0, 20, 40, 60, 80, 100]);

    let elec = tri.ticks(Axis::Elec);
    assert!(approx(elec[0].pos, tri.bio));
    assert!(approx(elec[5].pos, tri.elec));

    let foss = tri.ticks(Axis::Foss);
    assert!(approx(foss[0].pos, tri.elec));
    assert!(approx(foss[5].pos, tri.foss));
}

#[test]
fn highlight_bands_cover_full_range_with_rising_opacity() {
    let tri = Triangle::from_width(300.0);
    for axis in Axis::ALL {
        let bands = tri.highlight_bands(axis);
        assert_eq!(bands.len(), 5);
        let opacities: Vec<f64> = bands.iter().map(|b| b.opacity).collect();
        assert_eq!(opacities, [0.005, 0.01, 0.03, 0.05, 0.1]);

        let first = tri.unproject(bands[0].corners[0]).component(axis);
        let last = tri.unproject(bands[4].corners[2]).component(axis);
        assert!(first.abs() < 1e-9);
        assert!((last - 1.0).abs() < 1e-9);
    }
}

#[test]
fn edges_follow_reading_direction() {
    let tri = Triangle::from_width(10.0);
    assert_eq!(tri.edge(Axis::Bio), Line::new(tri.bio, tri.foss));
    assert_eq!(tri.edge(Axis::Foss), Line::new(tri.elec, tri.foss));
    assert_eq!(tri.edge(Axis::Elec), Line::new(tri.bio, tri.elec));
}

#[test]
fn axis_names_parse() {
    assert_eq!("fossil".parse::<Axis>().unwrap(), Axis::Foss);
    assert_eq!(" Elec ".parse::<Axis>().unwrap(), Axis::Elec);
    assert!("hydro".parse::<Axis>().is_err());
}

#[test]
fn mean_of_empty_slice_is_none() {
    assert!(Weights::mean(&[]).is_none());
    let m = Weights::mean(&[Weights::new(0.2, 0.3, 0.5), Weights::new(0.4, 0.1, 0.5)]).unwrap();
    assert!((m.bio - 0.3).abs() < 1e-12);
    assert!((m.elec - 0.2).abs() < 1e-12);
    assert!((m.foss - 0.5).abs() < 1e-12);
}
