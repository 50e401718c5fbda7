//! Margin-relative line classification.
//!
//! The page margin is fitted elsewhere and only consumed here. Indents are
//! measured in the margin's corrected frame: the line's left and right edge
//! midpoints and the margin boundary anchors are all rotated by the margin
//! angle, and each indent is the horizontal gap between a text edge and its
//! boundary in that frame.

use crate::error::{Error, Result};
use crate::geometry::{Angle, Point};
use crate::layout::collection::{FragmentCollection, LineCollection};
use crate::layout::line::{Line, LineFlags};
use crate::pipeline::config::FlagConfig;
use serde::{Deserialize, Serialize};

/// One fitted margin boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLine {
    /// Anchor point the indent is measured against
    pub start: Point,
    /// Far end of the boundary
    pub end: Point,
}

impl BoundaryLine {
    /// Create a boundary between two points.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vertical boundary at `x` spanning `top..bottom`.
    pub fn vertical(x: f64, top: f64, bottom: f64) -> Self {
        Self::new(Point::new(x, top), Point::new(x, bottom))
    }
}

/// Fitted left/right text boundaries and skew-correction angle of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Correction rotation applied as is to image coordinates.
    ///
    /// This is the negated page skew: for a page whose lines slope by
    /// `lines.avg_angle()`, the margin angle is `lines.avg_angle().negate()`.
    #[serde(default)]
    pub angle: Angle,
    /// Left text boundary
    pub left: Option<BoundaryLine>,
    /// Right text boundary
    pub right: Option<BoundaryLine>,
}

impl Margin {
    /// Margin with both boundaries present.
    pub fn new(angle: Angle, left: BoundaryLine, right: BoundaryLine) -> Self {
        Self {
            angle,
            left: Some(left),
            right: Some(right),
        }
    }

    /// Check that both boundary anchors are present and finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMargin`] naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.anchors().map(|_| ())
    }

    fn anchors(&self) -> Result<(Point, Point)> {
        if !self.angle.radians().is_finite() {
            return Err(Error::MalformedMargin(format!(
                "angle is not finite ({})",
                self.angle.radians()
            )));
        }
        let left = anchor("left", self.left.as_ref())?;
        let right = anchor("right", self.right.as_ref())?;
        Ok((left, right))
    }
}

fn anchor(side: &str, boundary: Option<&BoundaryLine>) -> Result<Point> {
    let boundary =
        boundary.ok_or_else(|| Error::MalformedMargin(format!("{} boundary is missing", side)))?;
    if !boundary.start.is_finite() {
        return Err(Error::MalformedMargin(format!(
            "{} boundary anchor is not finite ({:?})",
            side, boundary.start
        )));
    }
    Ok(boundary.start)
}

/// Source of the page margin.
///
/// Implementations choose which candidate lines take part in margin fitting
/// and fit the boundaries to them. Only the selected lines are classified.
pub trait MarginProvider: Send + Sync {
    /// Pick the lines used for fitting and classification.
    ///
    /// The default keeps every fragment.
    fn select_lines(&self, fragments: FragmentCollection) -> LineCollection {
        LineCollection::from(fragments)
    }

    /// Fit the margin to the selected lines.
    ///
    /// The returned [`Margin::angle`] is used without any sign change, so a
    /// provider that derives it from [`LineCollection::avg_angle`] must negate
    /// that angle first.
    fn fit(&self, lines: &LineCollection) -> Result<Margin>;

    /// Name of this provider, for logging.
    fn name(&self) -> &'static str;
}

/// A margin fitted ahead of time, returned as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMargin {
    margin: Margin,
}

impl FixedMargin {
    /// Wrap a pre-fitted margin.
    pub fn new(margin: Margin) -> Self {
        Self { margin }
    }
}

impl MarginProvider for FixedMargin {
    fn fit(&self, _lines: &LineCollection) -> Result<Margin> {
        self.margin.validate()?;
        Ok(self.margin)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Compute a line's left and right indents against the margin.
///
/// # Errors
///
/// Returns [`Error::MalformedMargin`] if a boundary anchor is missing or
/// non-finite. The line is left untouched in that case.
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::{Angle, Contour, PolygonShapes};
/// use page_oxide::layout::{determine_indents, BoundaryLine, Line, LineId, Margin, Word, WordArena, WordId};
///
/// let words = WordArena::new(vec![Word::new(Contour::rectangle(145, 0, 845, 20), &PolygonShapes).unwrap()]);
/// let mut line = Line::new(LineId(0), vec![WordId(0)], &words, &PolygonShapes).unwrap();
/// let margin = Margin::new(
///     Angle::ZERO,
///     BoundaryLine::vertical(100.0, 0.0, 1000.0),
///     BoundaryLine::vertical(1000.0, 0.0, 1000.0),
/// );
///
/// determine_indents(&mut line, &margin).unwrap();
/// assert_eq!(line.left_indent(), Some(45.0));
/// assert_eq!(line.right_indent(), Some(10.0));
/// ```
pub fn determine_indents(line: &mut Line, margin: &Margin) -> Result<()> {
    let (left_anchor, right_anchor) = margin.anchors()?;

    let text_left = line.bbox().center_left().rotate(margin.angle);
    let text_right = line.bbox().center_right().rotate(margin.angle);

    let margin_left = left_anchor.rotate(margin.angle);
    let margin_right = right_anchor.rotate(margin.angle);

    let left_projection = Point::new(margin_left.x, text_left.y);
    let right_projection = Point::new(margin_right.x, text_right.y);

    line.left_indent = Some(text_left.distance(&left_projection));
    line.right_indent = Some(text_right.distance(&right_projection));
    Ok(())
}

/// Whether the line's box is long and thin enough to be a printed rule.
pub fn is_horizontal_rule(line: &Line, config: &FlagConfig) -> bool {
    let width = line.width();
    width > config.rule_min_width && width < config.rule_max_width && line.height() < config.rule_max_height
}

/// Derive structural flags from the line's indents and size.
///
/// A horizontal rule carries no text, so when a line is one every other
/// flag stays false.
///
/// # Errors
///
/// Returns [`Error::Unclassified`] if [`determine_indents`] has not run.
pub fn set_flags(line: &mut Line, config: &FlagConfig) -> Result<()> {
    let (left, right) = match (line.left_indent(), line.right_indent()) {
        (Some(left), Some(right)) => (left, right),
        _ => return Err(Error::Unclassified(line.id().0)),
    };

    let mut flags = LineFlags::default();

    if is_horizontal_rule(line, config) {
        flags.horizontal_rule = true;
        line.flags = flags;
        return Ok(());
    }

    flags.paragraph_start = left > config.paragraph_start_min && left < config.paragraph_start_max;
    flags.paragraph_end = right > config.paragraph_end_min;
    flags.centered = left > config.centered_min_indent
        && right > config.centered_min_indent
        && (left - right).abs() < config.centered_max_difference;

    line.flags = flags;
    Ok(())
}

/// Determine indents, then flags.
pub fn classify(line: &mut Line, margin: &Margin, config: &FlagConfig) -> Result<()> {
    determine_indents(line, margin)?;
    set_flags(line, config)
}
