//! Page layout pipeline.
//!
//! This module wires the layout stages together for one page:
//!
//! ```text
//! Contour[]
//!     ↓
//! [word filter] (too few points, zero mass, too small → dropped)
//!     ↓
//! WordArena
//!     ↓
//! [WordGraph::link] (nearest-neighbour links)
//!     ↓
//! [LineAssembler] (components → lines, noise removal, merged-line repair)
//!     ↓
//! FragmentCollection
//!     ↓
//! [MarginProvider] (line selection, margin fit)
//!     ↓
//! LineCollection
//!     ↓
//! [classify] (indents, structural flags)
//!     ↓
//! PageLayout
//! ```
//!
//! Each page is analyzed independently; the pipeline holds no per-page
//! state and can be shared between threads.

pub mod config;

// Re-export main types
pub use config::{FlagConfig, LayoutConfig, LinkingConfig, SplitConfig, WordFilterConfig};

use crate::error::{Error, Result};
use crate::geometry::{Angle, Contour, PolygonShapes, ShapeProvider};
use crate::layout::{
    classify, FixedMargin, LineAssembler, Line, Margin, MarginProvider, Word, WordArena, WordGraph,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The page layout pipeline.
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::{Angle, Contour};
/// use page_oxide::layout::{BoundaryLine, FixedMargin, Margin};
/// use page_oxide::pipeline::LayoutPipeline;
///
/// let contours = vec![
///     Contour::rectangle(140, 100, 300, 30),
///     Contour::rectangle(450, 100, 300, 30),
/// ];
/// let margin = FixedMargin::new(Margin::new(
///     Angle::ZERO,
///     BoundaryLine::vertical(100.0, 0.0, 2000.0),
///     BoundaryLine::vertical(1200.0, 0.0, 2000.0),
/// ));
///
/// let page = LayoutPipeline::new().analyze(contours, &margin).unwrap();
/// assert_eq!(page.lines().len(), 1);
/// assert_eq!(page.paragraph_starts().count(), 1);
/// ```
pub struct LayoutPipeline {
    config: LayoutConfig,
    shapes: Box<dyn ShapeProvider>,
}

impl LayoutPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            shapes: Box::new(PolygonShapes),
        }
    }

    /// Replace the shape measurement backend.
    pub fn with_shape_provider(mut self, shapes: Box<dyn ShapeProvider>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Turn contours into words, dropping the ones that cannot be read.
    ///
    /// Contours with too few points, no mass, or an area not above the
    /// configured minimum are skipped. Word ids follow the order of the
    /// kept contours.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPage`] if no contour survives.
    pub fn build_words(&self, contours: Vec<Contour>) -> Result<WordArena> {
        let filter = &self.config.words;
        let total = contours.len();
        let mut words = Vec::with_capacity(total);
        let mut degenerate = 0usize;
        let mut small = 0usize;

        for contour in contours {
            if contour.len() < filter.min_points {
                degenerate += 1;
                continue;
            }

            match Word::new(contour, self.shapes.as_ref()) {
                Ok(word) if word.area() > filter.min_word_area => words.push(word),
                Ok(_) => small += 1,
                Err(Error::DegenerateShape { points, reason }) => {
                    log::debug!("Skipping contour with {} points: {}", points, reason);
                    degenerate += 1;
                },
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "Kept {} of {} contours as words ({} degenerate, {} too small)",
            words.len(),
            total,
            degenerate,
            small
        );

        if words.is_empty() {
            return Err(Error::EmptyPage);
        }
        Ok(WordArena::new(words))
    }

    /// Analyze one page.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] if the configuration is inconsistent
    /// - [`Error::EmptyPage`] if no words or no significant lines are found
    /// - [`Error::MalformedMargin`] if the fitted margin lacks an anchor
    pub fn analyze(&self, contours: Vec<Contour>, margins: &dyn MarginProvider) -> Result<PageLayout> {
        self.config.validate()?;

        let words = self.build_words(contours)?;
        let graph = WordGraph::link(&words, &self.config.linking);

        let fragments = {
            let mut assembler = LineAssembler::new(&words, &graph, self.shapes.as_ref());
            assembler.candidate_lines(&self.config.split)?
        };
        if fragments.is_empty() {
            return Err(Error::EmptyPage);
        }

        let mut lines = margins.select_lines(fragments);
        let margin = margins.fit(&lines)?;
        log::debug!(
            "Fitted {} margin over {} lines (angle {:.2}°)",
            margins.name(),
            lines.len(),
            margin.angle.degrees()
        );

        for line in lines.iter_mut() {
            classify(line, &margin, &self.config.flags)?;
        }

        let avg_angle = lines.avg_angle();
        let page = PageLayout {
            words,
            graph,
            lines: lines.into_lines(),
            avg_angle,
            margin,
        };

        log::info!(
            "Page analyzed: {} words, {} lines, {} paragraph starts, {} rules",
            page.words.len(),
            page.lines.len(),
            page.paragraph_starts().count(),
            page.horizontal_rules().count()
        );

        Ok(page)
    }

    /// Analyze a page whose margin was fitted ahead of time.
    pub fn analyze_input(&self, input: PageInput) -> Result<PageLayout> {
        let margins = FixedMargin::new(input.margin);
        self.analyze(input.contours, &margins)
    }
}

impl Default for LayoutPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Word contours of one page together with its fitted margin.
///
/// ```json
/// { "contours": [[[0, 0], [40, 0], [40, 20], [0, 20]]],
///   "margin": { "angle": 0.0,
///               "left":  { "start": {"x": 0, "y": 0}, "end": {"x": 0, "y": 900} },
///               "right": { "start": {"x": 900, "y": 0}, "end": {"x": 900, "y": 900} } } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Word contours in any order
    pub contours: Vec<Contour>,
    /// Pre-fitted page margin
    pub margin: Margin,
}

impl PageInput {
    /// Parse a page from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a page from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Result of analyzing one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    #[serde(skip)]
    words: WordArena,
    #[serde(skip)]
    graph: WordGraph,
    lines: Vec<Line>,
    avg_angle: Angle,
    margin: Margin,
}

impl PageLayout {
    /// Words kept on the page.
    pub fn words(&self) -> &WordArena {
        &self.words
    }

    /// Proximity graph between the words.
    pub fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// Classified lines, top to bottom.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Average orientation of the classified lines.
    pub fn avg_angle(&self) -> Angle {
        self.avg_angle
    }

    /// Margin the lines were classified against.
    pub fn margin(&self) -> &Margin {
        &self.margin
    }

    /// Lines that open a paragraph.
    pub fn paragraph_starts(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| l.flags().paragraph_start)
    }

    /// Lines that close a paragraph.
    pub fn paragraph_ends(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| l.flags().paragraph_end)
    }

    /// Centered lines.
    pub fn centered_lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| l.flags().centered)
    }

    /// Printed horizontal rules.
    pub fn horizontal_rules(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(|l| l.flags().horizontal_rule)
    }

    /// Consume the layout, keeping the ordered lines.
    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoundaryLine, WordId};

    fn margin() -> FixedMargin {
        FixedMargin::new(Margin::new(
            Angle::ZERO,
            BoundaryLine::vertical(100.0, 0.0, 2000.0),
            BoundaryLine::vertical(1200.0, 0.0, 2000.0),
        ))
    }

    #[test]
    fn test_build_words_filters_contours() {
        let pipeline = LayoutPipeline::new();
        let contours = vec![
            Contour::rectangle(0, 0, 40, 20),
            Contour::new(vec![[0, 0], [5, 5]]),
            Contour::new(vec![[0, 0], [10, 0], [20, 0]]),
            Contour::rectangle(100, 0, 5, 10),
            Contour::rectangle(200, 0, 40, 20),
        ];
        let words = pipeline.build_words(contours).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[WordId(1)].start().x, 200.0);
    }

    #[test]
    fn test_empty_page() {
        let pipeline = LayoutPipeline::new();
        assert!(matches!(pipeline.analyze(vec![], &margin()), Err(Error::EmptyPage)));

        let specks = vec![Contour::rectangle(0, 0, 5, 5), Contour::rectangle(50, 50, 7, 7)];
        assert!(matches!(pipeline.analyze(specks, &margin()), Err(Error::EmptyPage)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LayoutConfig::default().with_split(SplitConfig::default().with_suspicious_band(300.0, 80.0));
        let pipeline = LayoutPipeline::with_config(config);
        let result = pipeline.analyze(vec![Contour::rectangle(0, 0, 40, 20)], &margin());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_margin_fails_fast() {
        let broken = FixedMargin::new(Margin {
            angle: Angle::ZERO,
            left: None,
            right: Some(BoundaryLine::vertical(1200.0, 0.0, 2000.0)),
        });
        let result = LayoutPipeline::new().analyze(vec![Contour::rectangle(140, 0, 300, 30)], &broken);
        assert!(matches!(result, Err(Error::MalformedMargin(_))));
    }

    #[test]
    fn test_lines_are_ordered_top_to_bottom() {
        let contours = vec![
            Contour::rectangle(100, 300, 500, 30),
            Contour::rectangle(100, 100, 500, 30),
            Contour::rectangle(100, 200, 500, 30),
        ];
        let page = LayoutPipeline::new().analyze(contours, &margin()).unwrap();
        let tops: Vec<f64> = page.lines().iter().map(|l| l.center().y).collect();
        assert_eq!(tops, vec![115.0, 215.0, 315.0]);
        assert_eq!(page.avg_angle(), Angle::ZERO);
        assert_eq!(page.words().len(), 3);
        assert_eq!(page.graph().link_count(), 0);
    }

    #[test]
    fn test_page_input_from_json() {
        let json = r#"{
            "contours": [[[140, 0], [440, 0], [440, 30], [140, 30]]],
            "margin": {
                "angle": 0.0,
                "left": {"start": {"x": 100, "y": 0}, "end": {"x": 100, "y": 900}},
                "right": {"start": {"x": 1200, "y": 0}, "end": {"x": 1200, "y": 900}}
            }
        }"#;
        let input = PageInput::from_json(json).unwrap();
        assert_eq!(input.contours.len(), 1);

        let page = LayoutPipeline::new().analyze_input(input).unwrap();
        let line = &page.lines()[0];
        assert_eq!(line.left_indent(), Some(40.0));
        assert!(line.flags().paragraph_start);
        assert!(line.flags().paragraph_end);

        let rendered = serde_json::to_value(&page).unwrap();
        assert!(rendered.get("lines").is_some());
        assert!(rendered.get("words").is_none());
    }

    #[test]
    fn test_page_input_from_missing_file() {
        let result = PageInput::from_path("/nonexistent/page.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
