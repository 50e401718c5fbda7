//! Ordered line containers.
//!
//! [`FragmentCollection`] holds candidate lines straight out of assembly,
//! ordered by the vertical position of each line's leftmost word.
//! [`LineCollection`] holds the lines that take part in margin fitting and
//! orders them top to bottom in the page's own frame: box centers are
//! rotated by the negated average line angle before comparing their y.
//!
//! Both re-sort on every insertion. Sorting is stable, so lines with equal
//! keys keep their insertion order.

use crate::geometry::{cmp_f64, Angle};
use crate::layout::line::Line;
use std::ops::Index;

/// Candidate lines ordered by their leading word's vertical position.
#[derive(Debug, Clone, Default)]
pub struct FragmentCollection {
    lines: Vec<Line>,
}

impl FragmentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line and restore the order.
    pub fn append(&mut self, line: Line) {
        self.lines.push(line);
        self.update();
    }

    /// Insert several lines and restore the order once.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
        self.update();
    }

    /// The first `n` lines without removing them.
    pub fn peek_start(&self, n: usize) -> &[Line] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// Remove and return the first `n` lines.
    pub fn pull(&mut self, n: usize) -> Vec<Line> {
        let n = n.min(self.lines.len());
        self.lines.drain(..n).collect()
    }

    /// Remove and return the last line.
    pub fn pop(&mut self) -> Option<Line> {
        self.lines.pop()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Line at a position.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Consume the collection, keeping the order.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    fn update(&mut self) {
        self.lines
            .sort_by(|a, b| cmp_f64(a.leading_center().y, b.leading_center().y));
    }
}

impl Index<usize> for FragmentCollection {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}

impl FromIterator<Line> for FragmentCollection {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        let mut fragments = Self::new();
        fragments.extend(iter);
        fragments
    }
}

impl<'a> IntoIterator for &'a FragmentCollection {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Lines ordered top to bottom after compensating for page skew.
#[derive(Debug, Clone, Default)]
pub struct LineCollection {
    lines: Vec<Line>,
    avg_angle: Angle,
}

impl LineCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Average orientation of the lines that have one; zero when none do.
    pub fn avg_angle(&self) -> Angle {
        self.avg_angle
    }

    /// Insert a line, then recompute the average angle and the order.
    pub fn append(&mut self, line: Line) {
        self.lines.push(line);
        self.update();
    }

    /// Insert several lines and update once.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
        self.update();
    }

    /// The first `n` lines without removing them.
    pub fn peek_start(&self, n: usize) -> &[Line] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// Remove and return the first `n` lines.
    pub fn pull(&mut self, n: usize) -> Vec<Line> {
        let n = n.min(self.lines.len());
        let pulled = self.lines.drain(..n).collect();
        self.update();
        pulled
    }

    /// Remove and return the last line.
    pub fn pop(&mut self) -> Option<Line> {
        let line = self.lines.pop();
        self.update();
        line
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Mutable access to the lines, for classification.
    ///
    /// Classification never moves a line's box, so the order stays valid.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Line> {
        self.lines.iter_mut()
    }

    /// Line at a position.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Consume the collection, keeping the order.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    fn update(&mut self) {
        let angles: Vec<Angle> = self.lines.iter().filter_map(Line::angle).collect();
        self.avg_angle = Angle::average(&angles).unwrap_or(Angle::ZERO);

        let deskew = self.avg_angle.negate();
        self.lines.sort_by(|a, b| {
            cmp_f64(a.center().rotate(deskew).y, b.center().rotate(deskew).y)
        });
    }
}

impl Index<usize> for LineCollection {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}

impl FromIterator<Line> for LineCollection {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        let mut lines = Self::new();
        lines.extend(iter);
        lines
    }
}

impl From<FragmentCollection> for LineCollection {
    fn from(fragments: FragmentCollection) -> Self {
        fragments.into_lines().into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a LineCollection {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
