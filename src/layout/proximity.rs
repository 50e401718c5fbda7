//! Proximity graph linking words into reading-order chains.
//!
//! For every ordered pair of words the trailing anchor of one is compared to
//! the leading anchor of the other with an anisotropic distance. Pairs under
//! the threshold become candidates; each word then keeps only its nearest
//! candidate per direction, and every kept link is recorded on both ends.
//!
//! Ties on the minimum score go to the candidate with the lowest [`WordId`],
//! which is the first one met in the ascending enumeration, so linking is a
//! pure function of the word list.

use crate::geometry::weighted_distance;
use crate::layout::word::{WordArena, WordId};
use crate::pipeline::config::LinkingConfig;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A transient (word, score) pair considered during selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCandidate {
    /// Word that could be linked to
    pub target: WordId,
    /// Weighted anchor distance
    pub score: f64,
}

/// Candidates of one base word in both directions, in ascending target order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCandidates {
    /// Words whose leading anchor is near this word's trailing anchor
    pub right: Vec<LinkCandidate>,
    /// Words whose trailing anchor is near this word's leading anchor
    pub left: Vec<LinkCandidate>,
}

impl WordCandidates {
    /// Nearest right candidate, ties resolved to the lowest id.
    pub fn best_right(&self) -> Option<WordId> {
        best_of(&self.right)
    }

    /// Nearest left candidate, ties resolved to the lowest id.
    pub fn best_left(&self) -> Option<WordId> {
        best_of(&self.left)
    }
}

fn best_of(candidates: &[LinkCandidate]) -> Option<WordId> {
    candidates
        .iter()
        .fold(None::<&LinkCandidate>, |best, c| match best {
            Some(b) if b.score <= c.score => Some(b),
            _ => Some(c),
        })
        .map(|c| c.target)
}

/// Compute link candidates for every word.
///
/// The result is indexed by [`WordId`]. With the `parallel` feature the work
/// is split per base word; each word's lists are still built in ascending
/// target order, so both paths return identical candidates.
pub fn collect_candidates(words: &WordArena, config: &LinkingConfig) -> Vec<WordCandidates> {
    let bases: Vec<WordId> = words.ids().collect();

    #[cfg(feature = "parallel")]
    let iter = bases.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = bases.into_iter();

    iter.map(|base| candidates_for(words, base, config)).collect()
}

fn candidates_for(words: &WordArena, base: WordId, config: &LinkingConfig) -> WordCandidates {
    let mut candidates = WordCandidates::default();
    let word = &words[base];

    for (target, other) in words.iter() {
        if target == base {
            continue;
        }

        let right = weighted_distance(config.kernel, &word.end(), &other.start());
        if right < config.distance_threshold {
            candidates.right.push(LinkCandidate {
                target,
                score: right,
            });
        }

        let left = weighted_distance(config.kernel, &word.start(), &other.end());
        if left < config.distance_threshold {
            candidates.left.push(LinkCandidate {
                target,
                score: left,
            });
        }
    }

    candidates
}

/// Mutual left/right adjacency between the words of one page.
///
/// Each word selects at most one right link and one left link of its own, but
/// may additionally receive back-links from other words' selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordGraph {
    right: Vec<Vec<WordId>>,
    left: Vec<Vec<WordId>>,
}

impl WordGraph {
    /// Build the proximity graph for a page.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::{Contour, PolygonShapes};
    /// use page_oxide::layout::{Word, WordArena, WordGraph, WordId};
    /// use page_oxide::pipeline::LinkingConfig;
    ///
    /// let words = WordArena::new(vec![
    ///     Word::new(Contour::rectangle(0, 0, 40, 20), &PolygonShapes).unwrap(),
    ///     Word::new(Contour::rectangle(50, 0, 40, 20), &PolygonShapes).unwrap(),
    /// ]);
    /// let graph = WordGraph::link(&words, &LinkingConfig::default());
    /// assert_eq!(graph.right_links(WordId(0)), &[WordId(1)]);
    /// assert_eq!(graph.left_links(WordId(1)), &[WordId(0)]);
    /// ```
    pub fn link(words: &WordArena, config: &LinkingConfig) -> Self {
        let candidates = collect_candidates(words, config);
        let graph = Self::from_candidates(&candidates);
        log::debug!("Linked {} words with {} links", words.len(), graph.link_count());
        graph
    }

    /// Select the best candidate per direction and record links on both ends.
    ///
    /// `candidates[i]` belongs to `WordId(i)`.
    pub fn from_candidates(candidates: &[WordCandidates]) -> Self {
        let n = candidates.len();
        let mut graph = Self {
            right: vec![Vec::new(); n],
            left: vec![Vec::new(); n],
        };

        for (i, word_candidates) in candidates.iter().enumerate() {
            let base = WordId(i);
            if let Some(best) = word_candidates.best_right() {
                graph.add_link(base, best);
            }
            if let Some(best) = word_candidates.best_left() {
                graph.add_link(best, base);
            }
        }

        graph
    }

    /// Record `from → to` as a right link of `from` and a left link of `to`.
    fn add_link(&mut self, from: WordId, to: WordId) {
        if !self.right[from.0].contains(&to) {
            self.right[from.0].push(to);
        }
        if !self.left[to.0].contains(&from) {
            self.left[to.0].push(from);
        }
    }

    /// Number of words in the graph.
    pub fn len(&self) -> usize {
        self.right.len()
    }

    /// Whether the graph has no words.
    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }

    /// Words this word links to going rightwards.
    pub fn right_links(&self, id: WordId) -> &[WordId] {
        &self.right[id.0]
    }

    /// Words this word links to going leftwards.
    pub fn left_links(&self, id: WordId) -> &[WordId] {
        &self.left[id.0]
    }

    /// Right links followed by left links.
    pub fn neighbours(&self, id: WordId) -> impl Iterator<Item = WordId> + '_ {
        self.right[id.0].iter().chain(self.left[id.0].iter()).copied()
    }

    /// Whether two words are linked in either direction.
    pub fn are_linked(&self, a: WordId, b: WordId) -> bool {
        self.neighbours(a).any(|n| n == b)
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.right.iter().map(Vec::len).sum()
    }

    /// Every link between the given words, each reported once.
    ///
    /// Pairs are enumerated in the order of `words` (outer, then inner), which
    /// makes the first-acceptable-edge search of the splitter reproducible.
    pub fn edges_within(&self, words: &[WordId]) -> Vec<(WordId, WordId)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for &a in words {
            for &b in words {
                if a == b {
                    continue;
                }
                let key = (a.min(b), a.max(b));
                if seen.contains(&key) {
                    continue;
                }
                if self.are_linked(a, b) {
                    seen.insert(key);
                    edges.push((a, b));
                }
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Contour, PolygonShapes};
    use crate::layout::word::Word;

    fn arena(rects: &[(i32, i32, i32, i32)]) -> WordArena {
        WordArena::new(
            rects
                .iter()
                .map(|&(x, y, w, h)| Word::new(Contour::rectangle(x, y, w, h), &PolygonShapes).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_candidates_respect_threshold() {
        // Gap of 10 links, gap of 60 does not.
        let words = arena(&[(0, 0, 40, 20), (50, 0, 40, 20), (150, 0, 40, 20)]);
        let candidates = collect_candidates(&words, &LinkingConfig::default());
        assert_eq!(candidates[0].right.len(), 1);
        assert_eq!(candidates[0].right[0].target, WordId(1));
        assert_eq!(candidates[0].right[0].score, 10.0);
        assert!(candidates[1].right.is_empty());
        assert!(candidates[2].left.is_empty());
    }

    #[test]
    fn test_vertical_offset_is_penalized() {
        // Same raw distance (30) but vertical: 30 * 1.5 = 45 still links, 40 * 1.5 = 60 does not.
        let words = arena(&[(0, 0, 40, 20), (40, 30, 40, 20), (40, 40, 40, 20)]);
        let candidates = collect_candidates(&words, &LinkingConfig::default());
        let targets: Vec<WordId> = candidates[0].right.iter().map(|c| c.target).collect();
        assert_eq!(targets, vec![WordId(1)]);
        assert_eq!(candidates[0].right[0].score, 45.0);
    }

    #[test]
    fn test_selection_keeps_nearest() {
        let words = arena(&[(0, 0, 40, 20), (60, 0, 40, 20), (45, 0, 10, 20)]);
        let graph = WordGraph::link(&words, &LinkingConfig::default());
        assert_eq!(graph.right_links(WordId(0)), &[WordId(2)]);
    }

    #[test]
    fn test_tie_break_lowest_id() {
        let candidates = WordCandidates {
            right: vec![
                LinkCandidate { target: WordId(3), score: 5.0 },
                LinkCandidate { target: WordId(7), score: 5.0 },
                LinkCandidate { target: WordId(9), score: 6.0 },
            ],
            left: vec![],
        };
        assert_eq!(candidates.best_right(), Some(WordId(3)));
        assert_eq!(candidates.best_left(), None);
    }

    #[test]
    fn test_links_are_mutual_and_deduplicated() {
        let words = arena(&[(0, 0, 40, 20), (45, 0, 40, 20)]);
        let graph = WordGraph::link(&words, &LinkingConfig::default());
        assert_eq!(graph.right_links(WordId(0)), &[WordId(1)]);
        assert_eq!(graph.left_links(WordId(1)), &[WordId(0)]);
        assert!(graph.left_links(WordId(0)).is_empty());
        assert!(graph.right_links(WordId(1)).is_empty());
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_back_links_can_accumulate() {
        // Two words on top of each other both pick the same right neighbour.
        let candidates = vec![
            WordCandidates {
                right: vec![LinkCandidate { target: WordId(2), score: 4.0 }],
                left: vec![],
            },
            WordCandidates {
                right: vec![LinkCandidate { target: WordId(2), score: 8.0 }],
                left: vec![],
            },
            WordCandidates::default(),
        ];
        let graph = WordGraph::from_candidates(&candidates);
        assert_eq!(graph.left_links(WordId(2)), &[WordId(0), WordId(1)]);
    }

    #[test]
    fn test_edges_within_reports_each_link_once() {
        let words = arena(&[(0, 0, 40, 20), (45, 0, 40, 20), (90, 0, 40, 20)]);
        let graph = WordGraph::link(&words, &LinkingConfig::default());
        let edges = graph.edges_within(&[WordId(0), WordId(1), WordId(2)]);
        assert_eq!(edges, vec![(WordId(0), WordId(1)), (WordId(1), WordId(2))]);
    }

    #[test]
    fn test_isolated_words_have_no_links() {
        let words = arena(&[(0, 0, 40, 20), (500, 0, 40, 20)]);
        let graph = WordGraph::link(&words, &LinkingConfig::default());
        assert_eq!(graph.link_count(), 0);
        assert_eq!(graph.neighbours(WordId(0)).count(), 0);
        assert_eq!(graph.len(), 2);
    }
}
