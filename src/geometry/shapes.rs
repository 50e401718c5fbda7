//! Shape measurements over contours.
//!
//! The layout core never touches pixels. Everything it needs from a detected
//! shape (area, center of mass, minimum-area bounding rectangle) goes through
//! the [`ShapeProvider`] trait, so callers backed by an image-processing
//! library can plug in their own measurements. [`PolygonShapes`] is the pure
//! Rust default.

use super::{cmp_f64, Contour, Point, RotatedRect};

/// Measurements of contour shapes required by the layout core.
pub trait ShapeProvider: Send + Sync {
    /// Enclosed area of the contour polygon.
    fn area(&self, contour: &Contour) -> f64;

    /// Center of mass of the contour polygon.
    ///
    /// Returns `None` when the polygon has zero mass.
    fn center_of_mass(&self, contour: &Contour) -> Option<Point>;

    /// Minimum-area rectangle enclosing all points.
    ///
    /// Returns `None` for an empty point set.
    fn min_area_rect(&self, points: &[Point]) -> Option<RotatedRect>;

    /// Return the name of this provider for debugging.
    fn name(&self) -> &'static str;
}

/// Polygon-moment measurements with a rotating-calipers bounding rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonShapes;

impl ShapeProvider for PolygonShapes {
    fn area(&self, contour: &Contour) -> f64 {
        if contour.len() < 3 {
            return 0.0;
        }
        (twice_signed_area(contour.points()) as f64 / 2.0).abs()
    }

    fn center_of_mass(&self, contour: &Contour) -> Option<Point> {
        let points = contour.points();
        if points.len() < 3 {
            return None;
        }

        // m00 = A/2, m10 = Σ(xi + xj)·cross / 6, m01 likewise; kept in i64 until the division.
        let mut m00_x2: i64 = 0;
        let mut m10_x6: i64 = 0;
        let mut m01_x6: i64 = 0;
        for (i, &[xi, yi]) in points.iter().enumerate() {
            let [xj, yj] = points[(i + 1) % points.len()];
            let (xi, yi, xj, yj) = (xi as i64, yi as i64, xj as i64, yj as i64);
            let cross = xi * yj - xj * yi;
            m00_x2 += cross;
            m10_x6 += (xi + xj) * cross;
            m01_x6 += (yi + yj) * cross;
        }

        if m00_x2 == 0 {
            return None;
        }

        let denom = 3.0 * m00_x2 as f64;
        Some(Point::new(m10_x6 as f64 / denom, m01_x6 as f64 / denom))
    }

    fn min_area_rect(&self, points: &[Point]) -> Option<RotatedRect> {
        if points.is_empty() {
            return None;
        }

        let hull = convex_hull(points);
        if hull.len() < 3 {
            return Some(axis_aligned_extent(points));
        }

        Some(rotating_calipers(&hull))
    }

    fn name(&self) -> &'static str {
        "polygon"
    }
}

fn twice_signed_area(points: &[[i32; 2]]) -> i64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let [xi, yi] = points[i];
            let [xj, yj] = points[(i + 1) % n];
            xi as i64 * yj as i64 - xj as i64 * yi as i64
        })
        .sum()
}

/// Convex hull using Andrew's monotone chain, counter-clockwise.
fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| cmp_f64(a.x, b.x).then(cmp_f64(a.y, b.y)));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    // Last point of each half is the first of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Cross product of vectors OA and OB.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn axis_aligned_extent(points: &[Point]) -> RotatedRect {
    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    );
    RotatedRect::from_corners([
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ])
}

/// Minimum-area rectangle over a convex hull: one candidate per hull edge,
/// first strictly smaller area wins.
fn rotating_calipers(hull: &[Point]) -> RotatedRect {
    let n = hull.len();
    let mut best: Option<(f64, [Point; 4])> = None;

    for (i, &origin) in hull.iter().enumerate() {
        let next = hull[(i + 1) % n];
        let (ex, ey) = (next.x - origin.x, next.y - origin.y);
        let len = ex.hypot(ey);
        if len < f64::EPSILON {
            continue;
        }

        // Edge direction and its perpendicular.
        let (nx, ny) = (ex / len, ey / len);
        let (px, py) = (-ny, nx);

        let (mut min_n, mut max_n) = (f64::MAX, f64::MIN);
        let (mut min_p, mut max_p) = (f64::MAX, f64::MIN);
        for q in hull {
            let (dx, dy) = (q.x - origin.x, q.y - origin.y);
            let proj_n = nx * dx + ny * dy;
            let proj_p = px * dx + py * dy;
            min_n = min_n.min(proj_n);
            max_n = max_n.max(proj_n);
            min_p = min_p.min(proj_p);
            max_p = max_p.max(proj_p);
        }

        let area = (max_n - min_n) * (max_p - min_p);
        let improves = match &best {
            Some((best_area, _)) => area < *best_area,
            None => true,
        };
        if improves {
            let corner =
                |a: f64, b: f64| Point::new(origin.x + a * nx + b * px, origin.y + a * ny + b * py);
            best = Some((
                area,
                [
                    corner(min_n, min_p),
                    corner(max_n, min_p),
                    corner(max_n, max_p),
                    corner(min_n, max_p),
                ],
            ));
        }
    }

    match best {
        Some((_, corners)) => RotatedRect::from_corners(corners),
        None => axis_aligned_extent(hull),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_area_of_rectangle() {
        let shapes = PolygonShapes;
        assert_eq!(shapes.area(&Contour::rectangle(0, 0, 30, 10)), 300.0);
    }

    #[test]
    fn test_area_ignores_orientation() {
        let shapes = PolygonShapes;
        let clockwise = Contour::new(vec![[0, 0], [0, 10], [30, 10], [30, 0]]);
        assert_eq!(shapes.area(&clockwise), 300.0);
    }

    #[test]
    fn test_area_of_degenerate_contour() {
        let shapes = PolygonShapes;
        assert_eq!(shapes.area(&Contour::new(vec![[0, 0], [5, 5]])), 0.0);
    }

    #[test]
    fn test_center_of_mass_rectangle() {
        let shapes = PolygonShapes;
        let center = shapes.center_of_mass(&Contour::rectangle(10, 20, 30, 10)).unwrap();
        assert!((center.x - 25.0).abs() < EPS);
        assert!((center.y - 25.0).abs() < EPS);
    }

    #[test]
    fn test_center_of_mass_triangle() {
        let shapes = PolygonShapes;
        let triangle = Contour::new(vec![[0, 0], [6, 0], [0, 6]]);
        let center = shapes.center_of_mass(&triangle).unwrap();
        assert!((center.x - 2.0).abs() < EPS);
        assert!((center.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_center_of_mass_zero_area() {
        let shapes = PolygonShapes;
        let collinear = Contour::new(vec![[0, 0], [5, 0], [10, 0]]);
        assert!(shapes.center_of_mass(&collinear).is_none());
        assert!(shapes.center_of_mass(&Contour::new(vec![[0, 0], [1, 1]])).is_none());
    }

    #[test]
    fn test_min_area_rect_axis_aligned() {
        let shapes = PolygonShapes;
        let points = Contour::rectangle(10, 20, 30, 12).to_points();
        let rect = shapes.min_area_rect(&points).unwrap();
        assert!((rect.width() - 30.0).abs() < EPS);
        assert!((rect.height() - 12.0).abs() < EPS);
        assert!((rect.center().x - 25.0).abs() < EPS);
        assert!((rect.center().y - 26.0).abs() < EPS);
    }

    #[test]
    fn test_min_area_rect_rotated() {
        let shapes = PolygonShapes;
        // A 20x4 bar rotated by ~5.7° (slope 1/10).
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 10.0),
            Point::new(99.0, 20.0),
            Point::new(-1.0, 10.0),
        ];
        let rect = shapes.min_area_rect(&points).unwrap();
        let expected_width = 100.0f64.hypot(10.0);
        let expected_height = 1.0f64.hypot(10.0);
        assert!((rect.width() - expected_width).abs() < 1e-6);
        assert!((rect.height() - expected_height).abs() < 1e-6);
    }

    #[test]
    fn test_min_area_rect_interior_points_ignored() {
        let shapes = PolygonShapes;
        let mut points = Contour::rectangle(0, 0, 50, 10).to_points();
        points.push(Point::new(25.0, 5.0));
        points.push(Point::new(10.0, 2.0));
        let rect = shapes.min_area_rect(&points).unwrap();
        assert!((rect.width() - 50.0).abs() < EPS);
        assert!((rect.height() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_min_area_rect_collinear_points() {
        let shapes = PolygonShapes;
        let points = vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0), Point::new(20.0, 5.0)];
        let rect = shapes.min_area_rect(&points).unwrap();
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 0.0);
    }

    #[test]
    fn test_min_area_rect_empty() {
        assert!(PolygonShapes.min_area_rect(&[]).is_none());
    }

    #[test]
    fn test_convex_hull_drops_interior() {
        let mut points = Contour::rectangle(0, 0, 10, 10).to_points();
        points.push(Point::new(5.0, 5.0));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(5.0, 5.0)));
    }
}
