//! Line assembly from the word graph.
//!
//! Every connected component of the proximity graph becomes one [`Line`].
//! Components whose shape suggests two stacked lines glued together by a
//! stray link are handed to a greedy edge-cut search that tries to separate
//! them again.
//!
//! Traversal state lives in a [`VisitedSet`] owned by the caller, never on the
//! words, so split attempts can start from a clean slate each time.

use crate::error::{Error, Result};
use crate::geometry::ShapeProvider;
use crate::layout::collection::FragmentCollection;
use crate::layout::line::{Line, LineId};
use crate::layout::proximity::WordGraph;
use crate::layout::word::{WordArena, WordId};
use crate::pipeline::config::SplitConfig;

/// Traversal-local record of which words have been reached.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    seen: Vec<bool>,
}

impl VisitedSet {
    /// Empty set able to hold `len` words.
    pub fn new(len: usize) -> Self {
        Self {
            seen: vec![false; len],
        }
    }

    /// Mark a word; returns `true` if it was not marked before.
    pub fn insert(&mut self, id: WordId) -> bool {
        let was_seen = std::mem::replace(&mut self.seen[id.0], true);
        !was_seen
    }

    /// Whether a word is marked.
    pub fn contains(&self, id: WordId) -> bool {
        self.seen[id.0]
    }
}

/// Collect every word reachable from `seed` through unvisited words.
///
/// The seed is always part of the result, even when it was pre-marked as a
/// wall. Words already in `visited` are never entered, and every word the
/// traversal reaches is marked.
pub fn explore(graph: &WordGraph, seed: WordId, visited: &mut VisitedSet) -> Vec<WordId> {
    visited.insert(seed);
    let mut component = vec![seed];
    let mut pending = vec![seed];

    while let Some(current) = pending.pop() {
        for neighbour in graph.neighbours(current) {
            if visited.insert(neighbour) {
                pending.push(neighbour);
                component.push(neighbour);
            }
        }
    }

    component
}

/// Whether a line should go through the splitter.
///
/// Both comparisons are strict: lines exactly at the band limits, or with an
/// average area exactly at the significance threshold, are left alone.
pub fn is_suspicious(line: &Line, config: &SplitConfig) -> bool {
    let height = line.height();
    line.avg_area() > config.min_significant_area
        && height > config.suspicious_min_height
        && height < config.suspicious_max_height
}

/// Result of a split attempt.
#[derive(Debug, Clone)]
pub enum SplitOutcome {
    /// An edge cut produced two plausible single lines.
    Split(Line, Line),
    /// No edge cut worked; the original line is kept.
    Unsplit(Line),
}

impl SplitOutcome {
    /// The resulting lines, one or two.
    pub fn into_lines(self) -> Vec<Line> {
        match self {
            Self::Split(one, two) => vec![one, two],
            Self::Unsplit(line) => vec![line],
        }
    }

    /// Whether the line was split.
    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split(..))
    }
}

/// Turns a linked word graph into lines, tracking which line owns each word.
pub struct LineAssembler<'a> {
    words: &'a WordArena,
    graph: &'a WordGraph,
    shapes: &'a dyn ShapeProvider,
    owner: Vec<Option<LineId>>,
    next_id: u32,
}

impl<'a> LineAssembler<'a> {
    /// Create an assembler over a page's words and links.
    pub fn new(words: &'a WordArena, graph: &'a WordGraph, shapes: &'a dyn ShapeProvider) -> Self {
        Self {
            words,
            graph,
            shapes,
            owner: vec![None; words.len()],
            next_id: 0,
        }
    }

    /// Line currently owning a word, if any.
    pub fn owner(&self, id: WordId) -> Option<LineId> {
        self.owner[id.0]
    }

    /// Assemble every word into exactly one line.
    ///
    /// Seeds are taken from the highest unclaimed id downwards. Words with no
    /// links form single-word lines.
    pub fn assemble_all(&mut self) -> Result<Vec<Line>> {
        let mut visited = VisitedSet::new(self.words.len());
        let mut pool: Vec<WordId> = self.words.ids().collect();
        let mut lines = Vec::new();

        while let Some(seed) = pool.pop() {
            if self.owner[seed.0].is_some() {
                continue;
            }
            lines.push(self.assemble_from(seed, &mut visited)?);
        }

        log::debug!("Assembled {} lines from {} words", lines.len(), self.words.len());
        Ok(lines)
    }

    /// Assemble the component containing `seed` and claim its words.
    ///
    /// Words already owned by a line act as walls, whatever `visited` holds,
    /// so no word is ever claimed twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WordClaimed`] if `seed` already belongs to a line.
    pub fn assemble_from(&mut self, seed: WordId, visited: &mut VisitedSet) -> Result<Line> {
        if let Some(line) = self.owner[seed.0] {
            return Err(Error::WordClaimed {
                word: seed.0,
                line: line.0,
            });
        }
        for (index, owner) in self.owner.iter().enumerate() {
            if owner.is_some() {
                visited.insert(WordId(index));
            }
        }

        let component = explore(self.graph, seed, visited);
        let id = self.allocate_id();
        let line = Line::new(id, component, self.words, self.shapes)?;
        self.claim(&line);
        Ok(line)
    }

    /// Assemble all lines and keep the ones worth reading.
    ///
    /// Lines whose average word area is not above the significance threshold
    /// are dropped as dot/noise artifacts. Suspiciously tall lines are passed
    /// through [`LineAssembler::split`].
    pub fn candidate_lines(&mut self, config: &SplitConfig) -> Result<FragmentCollection> {
        let mut fragments = FragmentCollection::new();
        let mut dropped = 0usize;

        for line in self.assemble_all()? {
            if line.avg_area() <= config.min_significant_area {
                dropped += 1;
                continue;
            }

            if is_suspicious(&line, config) {
                fragments.extend(self.split(line, config)?.into_lines());
            } else {
                fragments.append(line);
            }
        }

        if dropped > 0 {
            log::debug!("Dropped {} noise lines below average area {}", dropped, config.min_significant_area);
        }

        Ok(fragments)
    }

    /// Try to separate a line made of two stacked lines.
    ///
    /// Every link inside the line is tried once, in the order reported by
    /// [`WordGraph::edges_within`]. Both endpoints become walls, and a
    /// traversal from each endpoint yields two sub-lines. The first cut that
    /// leaves both sub-lines below the single-line ceiling is accepted.
    pub fn split(&mut self, line: Line, config: &SplitConfig) -> Result<SplitOutcome> {
        let edges = self.graph.edges_within(line.words());

        for (a, b) in &edges {
            let mut visited = VisitedSet::new(self.words.len());
            visited.insert(*a);
            visited.insert(*b);

            let first = explore(self.graph, *a, &mut visited);
            let second = explore(self.graph, *b, &mut visited);

            let one = Line::new(LineId(self.next_id), first, self.words, self.shapes)?;
            let two = Line::new(LineId(self.next_id + 1), second, self.words, self.shapes)?;

            if one.height() < config.single_line_ceiling && two.height() < config.single_line_ceiling {
                self.next_id += 2;
                self.claim(&one);
                self.claim(&two);
                log::debug!(
                    "Split {} (height {:.1}) at {}-{} into heights {:.1} and {:.1}",
                    line.id(),
                    line.height(),
                    a,
                    b,
                    one.height(),
                    two.height()
                );
                return Ok(SplitOutcome::Split(one, two));
            }
        }

        log::warn!(
            "{} (height {:.1}, {} words) could not be split across {} links; keeping it whole",
            line.id(),
            line.height(),
            line.len(),
            edges.len()
        );
        Ok(SplitOutcome::Unsplit(line))
    }

    fn allocate_id(&mut self) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        id
    }

    fn claim(&mut self, line: &Line) {
        for word in line.words() {
            self.owner[word.0] = Some(line.id());
        }
    }
}
