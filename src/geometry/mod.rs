//! Geometric primitives for layout reconstruction.
//!
//! This module provides the point, angle and rectangle types used by the word
//! graph and line summarization, together with the distance and line-fitting
//! operations they rely on. Coordinates are image pixels: x grows to the
//! right, y grows downwards.

pub mod shapes;

pub use shapes::{PolygonShapes, ShapeProvider};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A 2D point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment between two points.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Rotate this point about the origin by `angle`.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::{Angle, Point};
    ///
    /// let p = Point::new(1.0, 0.0).rotate(Angle::from_degrees(90.0));
    /// assert!(p.x.abs() < 1e-12);
    /// assert!((p.y - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotate(self, angle: Angle) -> Point {
        let (sin, cos) = angle.radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean_distance(self, other)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An orientation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    /// Angle of zero radians.
    pub const ZERO: Angle = Angle(0.0);

    /// Create an angle from radians.
    pub fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    /// Create an angle from degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    /// Value in radians.
    pub fn radians(&self) -> f64 {
        self.0
    }

    /// Value in degrees.
    pub fn degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// The opposite rotation.
    pub fn negate(self) -> Angle {
        Angle(-self.0)
    }

    /// Average of line orientations.
    ///
    /// Line directions are axial (θ and θ + 180° describe the same line), so
    /// the mean is taken over doubled angles and halved again. Returns `None`
    /// for an empty slice.
    pub fn average(angles: &[Angle]) -> Option<Angle> {
        if angles.is_empty() {
            return None;
        }

        let (sin, cos) = angles.iter().fold((0.0, 0.0), |(s, c), a| {
            let (sa, ca) = (2.0 * a.0).sin_cos();
            (s + sa, c + ca)
        });

        Some(Angle(0.5 * sin.atan2(cos)))
    }
}

/// Independent horizontal and vertical scale factors for [`weighted_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceKernel {
    /// Horizontal scale factor
    pub x: f64,
    /// Vertical scale factor
    pub y: f64,
}

impl DistanceKernel {
    /// Create a new kernel.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for DistanceKernel {
    fn default() -> Self {
        Self { x: 1.0, y: 1.5 }
    }
}

/// Compute the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::{Point, euclidean_distance};
///
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(euclidean_distance(&p1, &p2), 5.0);
/// ```
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Anisotropic Euclidean distance.
///
/// The horizontal and vertical deltas are scaled by the kernel before the
/// usual distance is taken, so a kernel with `y > x` penalizes vertical offset
/// more than horizontal offset.
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::{DistanceKernel, Point, weighted_distance};
///
/// let kernel = DistanceKernel::new(1.0, 1.5);
/// let d = weighted_distance(kernel, &Point::new(0.0, 0.0), &Point::new(0.0, 2.0));
/// assert_eq!(d, 3.0);
/// ```
pub fn weighted_distance(kernel: DistanceKernel, p: &Point, q: &Point) -> f64 {
    let run = (p.x - q.x) * kernel.x;
    let rise = (p.y - q.y) * kernel.y;
    run.hypot(rise)
}

/// Direction of the least-squares line through a set of points.
///
/// Uses orthogonal regression, so vertical point sets are handled as well as
/// horizontal ones. The result lies in (-90°, 90°]. Returns `None` when there
/// are fewer than two distinct points.
pub fn fit_line_angle(points: &[Point]) -> Option<Angle> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx + syy <= f64::EPSILON {
        return None;
    }

    Some(Angle::from_radians(0.5 * (2.0 * sxy).atan2(sxx - syy)))
}

/// Total order on `f64` used for all geometric sorting.
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// An ordered sequence of integer pixel points outlining one shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    points: Vec<[i32; 2]>,
}

impl Contour {
    /// Create a contour from `[x, y]` pixel points.
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangular outline, handy for synthetic pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Contour;
    ///
    /// let c = Contour::rectangle(10, 20, 30, 12);
    /// assert_eq!(c.len(), 4);
    /// ```
    pub fn rectangle(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(vec![
            [x, y],
            [x + width, y],
            [x + width, y + height],
            [x, y + height],
        ])
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The raw integer points.
    pub fn points(&self) -> &[[i32; 2]] {
        &self.points
    }

    /// Points converted to floating-point coordinates.
    pub fn to_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|&[x, y]| Point::new(x as f64, y as f64))
            .collect()
    }
}

/// A rectangle of arbitrary rotation, stored by its corners.
///
/// Corners are classified independently of any rotation convention: the two
/// corners with the smallest x form the left edge and the other two the right
/// edge, and each pair is ordered top to bottom. Word anchors and line indents
/// are all read from this classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    top_left: Point,
    top_right: Point,
    bottom_right: Point,
    bottom_left: Point,
}

impl RotatedRect {
    /// Build a rectangle from its four corners in any order.
    pub fn from_corners(corners: [Point; 4]) -> Self {
        let mut sorted = corners;
        sorted.sort_by(|a, b| cmp_f64(a.x, b.x).then(cmp_f64(a.y, b.y)));

        let (mut left, mut right) = ([sorted[0], sorted[1]], [sorted[2], sorted[3]]);
        left.sort_by(|a, b| cmp_f64(a.y, b.y));
        right.sort_by(|a, b| cmp_f64(a.y, b.y));

        Self {
            top_left: left[0],
            bottom_left: left[1],
            top_right: right[0],
            bottom_right: right[1],
        }
    }

    /// Corners ordered top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Midpoint of the left (leading) edge.
    pub fn center_left(&self) -> Point {
        Point::midpoint(self.top_left, self.bottom_left)
    }

    /// Midpoint of the right (trailing) edge.
    pub fn center_right(&self) -> Point {
        Point::midpoint(self.top_right, self.bottom_right)
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::midpoint(self.center_left(), self.center_right())
    }

    /// Extent along the reading direction.
    pub fn width(&self) -> f64 {
        euclidean_distance(&self.center_left(), &self.center_right())
    }

    /// Extent across the reading direction.
    pub fn height(&self) -> f64 {
        euclidean_distance(&self.top_left, &self.bottom_left)
    }
}
