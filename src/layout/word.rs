//! Word shapes and their connection anchors.
//!
//! A word is one word-shaped contour detected on the page. Besides its
//! center of mass and minimum-area rectangle it carries two anchors used as
//! graph ports: `start` is the midpoint of the rectangle's leading (left)
//! edge and `end` the midpoint of its trailing (right) edge.

use crate::error::{Error, Result};
use crate::geometry::{Contour, Point, RotatedRect, ShapeProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Stable handle of a word within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub usize);

impl WordId {
    /// Position of the word in its [`WordArena`].
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// A word-shaped region reduced to its geometry.
///
/// All fields are derived once at construction and never change.
#[derive(Debug, Clone)]
pub struct Word {
    contour: Contour,
    center: Point,
    rect: RotatedRect,
    start: Point,
    end: Point,
    area: f64,
}

impl Word {
    /// Build a word from its contour.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateShape`] when the contour has fewer than three
    /// points or zero mass, since neither has a defined center of mass.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::{Contour, Point, PolygonShapes};
    /// use page_oxide::layout::Word;
    ///
    /// let word = Word::new(Contour::rectangle(10, 20, 40, 10), &PolygonShapes).unwrap();
    /// assert_eq!(word.start(), Point::new(10.0, 25.0));
    /// assert_eq!(word.end(), Point::new(50.0, 25.0));
    /// ```
    pub fn new(contour: Contour, shapes: &dyn ShapeProvider) -> Result<Self> {
        if contour.len() < 3 {
            return Err(Error::DegenerateShape {
                points: contour.len(),
                reason: "fewer than 3 points".to_string(),
            });
        }

        let center = shapes
            .center_of_mass(&contour)
            .ok_or_else(|| Error::DegenerateShape {
                points: contour.len(),
                reason: "zero mass".to_string(),
            })?;

        let rect = shapes
            .min_area_rect(&contour.to_points())
            .ok_or_else(|| Error::DegenerateShape {
                points: contour.len(),
                reason: "no bounding rectangle".to_string(),
            })?;

        let area = shapes.area(&contour);

        Ok(Self {
            center,
            start: rect.center_left(),
            end: rect.center_right(),
            rect,
            area,
            contour,
        })
    }

    /// The source contour.
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    /// Center of mass.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Minimum-area bounding rectangle.
    pub fn rect(&self) -> &RotatedRect {
        &self.rect
    }

    /// Leading anchor (midpoint of the left edge).
    pub fn start(&self) -> Point {
        self.start
    }

    /// Trailing anchor (midpoint of the right edge).
    pub fn end(&self) -> Point {
        self.end
    }

    /// Contour area.
    pub fn area(&self) -> f64 {
        self.area
    }
}

/// All words of one page, addressed by [`WordId`].
#[derive(Debug, Clone, Default)]
pub struct WordArena {
    words: Vec<Word>,
}

impl WordArena {
    /// Create an arena from already-built words. Ids follow vector order.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the arena holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Look up a word.
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(id.0)
    }

    /// All word ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = WordId> + '_ {
        (0..self.words.len()).map(WordId)
    }

    /// Words together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> + '_ {
        self.words.iter().enumerate().map(|(i, w)| (WordId(i), w))
    }
}

impl Index<WordId> for WordArena {
    type Output = Word;

    fn index(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PolygonShapes;

    #[test]
    fn test_word_anchors_axis_aligned() {
        let word = Word::new(Contour::rectangle(100, 40, 60, 20), &PolygonShapes).unwrap();
        assert_eq!(word.start(), Point::new(100.0, 50.0));
        assert_eq!(word.end(), Point::new(160.0, 50.0));
        assert_eq!(word.area(), 1200.0);
        assert!((word.center().x - 130.0).abs() < 1e-9);
        assert!((word.center().y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_anchors_independent_of_point_order() {
        let reversed = Contour::new(vec![[160, 60], [160, 40], [100, 40], [100, 60]]);
        let word = Word::new(reversed, &PolygonShapes).unwrap();
        assert_eq!(word.start(), Point::new(100.0, 50.0));
        assert_eq!(word.end(), Point::new(160.0, 50.0));
    }

    #[test]
    fn test_word_start_is_left_of_end() {
        let contour = Contour::new(vec![[0, 4], [50, 0], [51, 10], [1, 14]]);
        let word = Word::new(contour, &PolygonShapes).unwrap();
        assert!(word.start().x < word.end().x);
    }

    #[test]
    fn test_word_too_few_points() {
        let err = Word::new(Contour::new(vec![[0, 0], [10, 0]]), &PolygonShapes).unwrap_err();
        assert!(matches!(err, Error::DegenerateShape { points: 2, .. }));
    }

    #[test]
    fn test_word_zero_mass() {
        let flat = Contour::new(vec![[0, 0], [10, 0], [20, 0]]);
        let err = Word::new(flat, &PolygonShapes).unwrap_err();
        assert!(matches!(err, Error::DegenerateShape { points: 3, .. }));
    }

    #[test]
    fn test_arena_indexing() {
        let words = vec![
            Word::new(Contour::rectangle(0, 0, 10, 10), &PolygonShapes).unwrap(),
            Word::new(Contour::rectangle(20, 0, 10, 10), &PolygonShapes).unwrap(),
        ];
        let arena = WordArena::new(words);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[WordId(1)].start(), Point::new(20.0, 5.0));
        assert!(arena.get(WordId(2)).is_none());
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![WordId(0), WordId(1)]);
        assert_eq!(WordId(3).to_string(), "w3");
    }
}
