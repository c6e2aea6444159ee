use crate::foundation::core::{BezPath, Point};

/// Uniform cubic B-spline through `points`, as cubic Bézier segments.
///
/// The curve starts at the first point, ends at the last one and is pulled toward the interior
/// points without passing through them. Two points give a straight segment; fewer give an empty
/// path.
pub fn basis_spline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    match points {
        [] | [_] => return path,
        [a, b] => {
            path.move_to(*a);
            path.line_to(*b);
            return path;
        }
        _ => {}
    }

    let lerp3 = |a: Point, b: Point, c: Point, wa: f64, wb: f64, wc: f64, d: f64| {
        Point::new(
            (wa * a.x + wb * b.x + wc * c.x) / d,
            (wa * a.y + wb * b.y + wc * c.y) / d,
        )
    };

    let p0 = points[0];
    let p1 = points[1];
    path.move_to(p0);
    path.line_to(lerp3(p0, p1, p1, 5.0, 1.0, 0.0, 6.0));

    let mut x0 = p0;
    let mut x1 = p1;
    for &x in &points[2..] {
        path.curve_to(
            lerp3(x0, x1, x1, 2.0, 1.0, 0.0, 3.0),
            lerp3(x0, x1, x1, 1.0, 2.0, 0.0, 3.0),
            lerp3(x0, x1, x, 1.0, 4.0, 1.0, 6.0),
        );
        x0 = x1;
        x1 = x;
    }

    // closing segment repeats the last point
    path.curve_to(
        lerp3(x0, x1, x1, 2.0, 1.0, 0.0, 3.0),
        lerp3(x0, x1, x1, 1.0, 2.0, 0.0, 3.0),
        lerp3(x0, x1, x1, 1.0, 4.0, 1.0, 6.0),
    );
    path.line_to(x1);
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/curve.rs"]
mod tests;
