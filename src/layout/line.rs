//! Text lines and their geometry.
//!
//! A line is a connected set of linked words. Its geometry (word order,
//! orientation, bounding box, areas) is always derived from the words it
//! holds, so re-summarizing an unchanged line reproduces the same values.

use crate::error::{Error, Result};
use crate::geometry::{cmp_f64, fit_line_angle, Angle, Point, RotatedRect, ShapeProvider};
use crate::layout::word::{WordArena, WordId};
use serde::Serialize;
use std::fmt;

/// Identifier of a line, unique within one page analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}

/// Structural role of a line relative to the page margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LineFlags {
    /// Line is indented like the first line of a paragraph
    pub paragraph_start: bool,
    /// Line stops short of the right margin
    pub paragraph_end: bool,
    /// Line is centered between the margins
    pub centered: bool,
    /// Line is a long thin printed rule rather than text
    pub horizontal_rule: bool,
}

/// One reconstructed row of text.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    id: LineId,
    words: Vec<WordId>,
    angle: Option<Angle>,
    bbox: RotatedRect,
    leading_center: Point,
    total_area: f64,
    avg_area: f64,
    pub(crate) left_indent: Option<f64>,
    pub(crate) right_indent: Option<f64>,
    pub(crate) flags: LineFlags,
}

impl Line {
    /// Build a line from its words and summarize its geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLine`] when `words` is empty.
    pub fn new(
        id: LineId,
        words: Vec<WordId>,
        arena: &WordArena,
        shapes: &dyn ShapeProvider,
    ) -> Result<Self> {
        let Summary {
            words,
            angle,
            bbox,
            leading_center,
            total_area,
            avg_area,
        } = summarize(id, words, arena, shapes)?;
        Ok(Self {
            id,
            words,
            angle,
            bbox,
            leading_center,
            total_area,
            avg_area,
            left_indent: None,
            right_indent: None,
            flags: LineFlags::default(),
        })
    }

    /// Re-derive word order, angle, bounding box and areas from the words.
    pub fn summarize(&mut self, arena: &WordArena, shapes: &dyn ShapeProvider) -> Result<()> {
        let words = std::mem::take(&mut self.words);
        let summary = summarize(self.id, words, arena, shapes)?;
        self.words = summary.words;
        self.angle = summary.angle;
        self.bbox = summary.bbox;
        self.leading_center = summary.leading_center;
        self.total_area = summary.total_area;
        self.avg_area = summary.avg_area;
        Ok(())
    }

    /// Line identifier.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Words ordered by horizontal center.
    pub fn words(&self) -> &[WordId] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed line.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether the word belongs to this line.
    pub fn contains(&self, word: WordId) -> bool {
        self.words.contains(&word)
    }

    /// Least-squares orientation through the word centers; `None` for a
    /// single word.
    pub fn angle(&self) -> Option<Angle> {
        self.angle
    }

    /// Minimum-area rectangle around every word's contour points.
    pub fn bbox(&self) -> &RotatedRect {
        &self.bbox
    }

    /// Center of mass of the leftmost word.
    pub fn leading_center(&self) -> Point {
        self.leading_center
    }

    /// Box center.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Box extent along the line.
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    /// Box extent across the line.
    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    /// Sum of word areas.
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Mean word area.
    pub fn avg_area(&self) -> f64 {
        self.avg_area
    }

    /// Distance to the left margin, once determined.
    pub fn left_indent(&self) -> Option<f64> {
        self.left_indent
    }

    /// Distance to the right margin, once determined.
    pub fn right_indent(&self) -> Option<f64> {
        self.right_indent
    }

    /// Structural flags.
    pub fn flags(&self) -> LineFlags {
        self.flags
    }
}

struct Summary {
    words: Vec<WordId>,
    angle: Option<Angle>,
    bbox: RotatedRect,
    leading_center: Point,
    total_area: f64,
    avg_area: f64,
}

fn summarize(
    id: LineId,
    mut words: Vec<WordId>,
    arena: &WordArena,
    shapes: &dyn ShapeProvider,
) -> Result<Summary> {
    if words.is_empty() {
        return Err(Error::EmptyLine(id.0));
    }

    words.sort_by(|a, b| cmp_f64(arena[*a].center().x, arena[*b].center().x).then(a.cmp(b)));

    let centers: Vec<Point> = words.iter().map(|w| arena[*w].center()).collect();
    let angle = fit_line_angle(&centers);

    let points: Vec<Point> = words
        .iter()
        .flat_map(|w| arena[*w].contour().to_points())
        .collect();
    let bbox = shapes.min_area_rect(&points).ok_or(Error::EmptyLine(id.0))?;

    let total_area: f64 = words.iter().map(|w| arena[*w].area()).sum();
    let avg_area = total_area / words.len() as f64;

    Ok(Summary {
        leading_center: centers[0],
        words,
        angle,
        bbox,
        total_area,
        avg_area,
    })
}
