//! Error types for page layout reconstruction.
//!
//! This module defines all error types that can occur while turning word
//! contours into classified text lines.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page layout reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Contour cannot be turned into a word (too few points or zero mass)
    #[error("Degenerate shape with {points} points: {reason}")]
    DegenerateShape {
        /// Number of points in the rejected contour
        points: usize,
        /// Why the contour was rejected
        reason: String,
    },

    /// No usable content on the page
    #[error("Page has no content: no significant words or lines were found")]
    EmptyPage,

    /// Margin descriptor is missing an anchor or carries non-finite values
    #[error("Malformed margin: {0}")]
    MalformedMargin(String),

    /// A line was built without any words
    #[error("Line {0} has no words")]
    EmptyLine(u32),

    /// A word was offered to a second line
    #[error("Word w{word} already belongs to line {line}")]
    WordClaimed {
        /// Index of the claimed word
        word: usize,
        /// Line that owns it
        line: u32,
    },

    /// Flags were requested before indents were determined
    #[error("Line {0} has no indents; determine indents before setting flags")]
    Unclassified(u32),

    /// Configuration violates its own constraints
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON configuration or page input could not be parsed
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
