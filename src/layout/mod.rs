//! Layout reconstruction from word shapes.
//!
//! This module turns unordered word contours into ordered, classified text
//! lines:
//! - Word anchors (contour → word with leading/trailing ports)
//! - Proximity graph (nearest-neighbour links between words)
//! - Line assembly (connected components, merged-line splitting)
//! - Line geometry (orientation, bounding box, areas)
//! - Margin-relative classification (indents and structural flags)

pub mod assembly;
pub mod classify;
pub mod collection;
pub mod line;
pub mod proximity;
pub mod word;

// Re-export main types
pub use assembly::{explore, is_suspicious, LineAssembler, SplitOutcome, VisitedSet};
pub use classify::{
    classify, determine_indents, is_horizontal_rule, set_flags, BoundaryLine, FixedMargin, Margin,
    MarginProvider,
};
pub use collection::{FragmentCollection, LineCollection};
pub use line::{Line, LineFlags, LineId};
pub use proximity::{collect_candidates, LinkCandidate, WordCandidates, WordGraph};
pub use word::{Word, WordArena, WordId};
