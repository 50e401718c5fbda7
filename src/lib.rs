//! # Page Oxide
//!
//! Page layout reconstruction for scanned book pages: word shapes in,
//! ordered and classified text lines out.
//!
//! ## Core Features
//!
//! - **Word Anchors**: each word contour gets a center of mass, a minimum-area
//!   rectangle and leading/trailing ports
//! - **Proximity Graph**: words link to their nearest neighbour on each side
//!   under an anisotropic distance that penalizes vertical offsets
//! - **Line Assembly**: connected components become lines; tall components
//!   made of two glued lines are split again with a greedy edge cut
//! - **Line Geometry**: orientation, bounding box, total and average area
//! - **Classification**: indents against an externally fitted margin and
//!   structural flags (paragraph start/end, centered, horizontal rule)
//!
//! Image processing and margin fitting are outside this crate. Shape
//! measurements come from a [`geometry::ShapeProvider`] and the margin from a
//! [`layout::MarginProvider`].
//!
//! ## Quick Start
//!
//! ```
//! use page_oxide::geometry::{Angle, Contour};
//! use page_oxide::layout::{BoundaryLine, FixedMargin, Margin};
//! use page_oxide::pipeline::LayoutPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let contours = vec![
//!     Contour::rectangle(140, 100, 300, 30),
//!     Contour::rectangle(450, 100, 300, 30),
//!     Contour::rectangle(100, 160, 400, 30),
//! ];
//! let margin = FixedMargin::new(Margin::new(
//!     Angle::ZERO,
//!     BoundaryLine::vertical(100.0, 0.0, 2000.0),
//!     BoundaryLine::vertical(800.0, 0.0, 2000.0),
//! ));
//!
//! let page = LayoutPipeline::new().analyze(contours, &margin)?;
//! for line in page.lines() {
//!     println!("{} words, flags {:?}", line.len(), line.flags());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometric primitives and shape measurement
pub mod geometry;

// Words, graph, lines and classification
pub mod layout;

// Page orchestration and configuration
pub mod pipeline;

// Re-exports
pub use error::{Error, Result};
pub use pipeline::{LayoutConfig, LayoutPipeline, PageInput, PageLayout};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "page_oxide");
    }
}
