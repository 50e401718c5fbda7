//! Configuration for the page layout pipeline.
//!
//! Every threshold used while turning word contours into classified lines
//! lives here. The defaults are tuned for pages scanned at the reference
//! working resolution; use [`LayoutConfig::scaled`] for other resolutions
//! instead of editing individual values.
//!
//! Configurations can be loaded from JSON. Missing fields take their
//! default value:
//!
//! ```
//! use page_oxide::pipeline::LayoutConfig;
//!
//! let config = LayoutConfig::from_json(r#"{ "linking": { "distance_threshold": 40.0 } }"#).unwrap();
//! assert_eq!(config.linking.distance_threshold, 40.0);
//! assert_eq!(config.split.single_line_ceiling, 55.0);
//! ```

use crate::error::{Error, Result};
use crate::geometry::DistanceKernel;
use serde::{Deserialize, Serialize};

/// Complete configuration of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Which contours become words
    pub words: WordFilterConfig,

    /// How words are linked into chains
    pub linking: LinkingConfig,

    /// Noise removal and merged-line repair
    pub split: SplitConfig,

    /// Structural flag thresholds
    pub flags: FlagConfig,
}

impl LayoutConfig {
    /// Parse a configuration from JSON.
    ///
    /// The parsed configuration is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every threshold is finite and every band is well ordered.
    pub fn validate(&self) -> Result<()> {
        self.words.validate()?;
        self.linking.validate()?;
        self.split.validate()?;
        self.flags.validate()
    }

    /// Configuration for a scan at `factor` times the reference resolution.
    ///
    /// Length thresholds grow linearly with `factor`, area thresholds with
    /// its square. The distance kernel is a ratio and is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::pipeline::LayoutConfig;
    ///
    /// let half = LayoutConfig::default().scaled(0.5);
    /// assert_eq!(half.linking.distance_threshold, 25.0);
    /// assert_eq!(half.words.min_word_area, 12.5);
    /// ```
    pub fn scaled(&self, factor: f64) -> Self {
        let area = factor * factor;
        Self {
            words: WordFilterConfig {
                min_points: self.words.min_points,
                min_word_area: self.words.min_word_area * area,
            },
            linking: LinkingConfig {
                kernel: self.linking.kernel,
                distance_threshold: self.linking.distance_threshold * factor,
            },
            split: SplitConfig {
                min_significant_area: self.split.min_significant_area * area,
                suspicious_min_height: self.split.suspicious_min_height * factor,
                suspicious_max_height: self.split.suspicious_max_height * factor,
                single_line_ceiling: self.split.single_line_ceiling * factor,
            },
            flags: FlagConfig {
                rule_min_width: self.flags.rule_min_width * factor,
                rule_max_width: self.flags.rule_max_width * factor,
                rule_max_height: self.flags.rule_max_height * factor,
                paragraph_start_min: self.flags.paragraph_start_min * factor,
                paragraph_start_max: self.flags.paragraph_start_max * factor,
                paragraph_end_min: self.flags.paragraph_end_min * factor,
                centered_min_indent: self.flags.centered_min_indent * factor,
                centered_max_difference: self.flags.centered_max_difference * factor,
            },
        }
    }

    /// Replace the word filter settings.
    pub fn with_words(mut self, words: WordFilterConfig) -> Self {
        self.words = words;
        self
    }

    /// Replace the linking settings.
    pub fn with_linking(mut self, linking: LinkingConfig) -> Self {
        self.linking = linking;
        self
    }

    /// Replace the splitting settings.
    pub fn with_split(mut self, split: SplitConfig) -> Self {
        self.split = split;
        self
    }

    /// Replace the flag thresholds.
    pub fn with_flags(mut self, flags: FlagConfig) -> Self {
        self.flags = flags;
        self
    }
}

/// Which contours are turned into words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordFilterConfig {
    /// Contours with fewer points are discarded
    pub min_points: usize,

    /// Words must have an area strictly above this
    pub min_word_area: f64,
}

impl Default for WordFilterConfig {
    fn default() -> Self {
        Self {
            min_points: 3,
            min_word_area: 50.0,
        }
    }
}

impl WordFilterConfig {
    /// Set the minimum number of contour points.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Set the minimum word area.
    pub fn with_min_word_area(mut self, area: f64) -> Self {
        self.min_word_area = area;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.min_points < 3 {
            return Err(Error::InvalidConfig(format!(
                "words.min_points must be at least 3, got {}",
                self.min_points
            )));
        }
        non_negative("words.min_word_area", self.min_word_area)
    }
}

/// Proximity graph settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkingConfig {
    /// Horizontal/vertical weights of the anchor distance
    pub kernel: DistanceKernel,

    /// Anchors must be strictly closer than this to become candidates
    pub distance_threshold: f64,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            kernel: DistanceKernel::default(),
            distance_threshold: 50.0,
        }
    }
}

impl LinkingConfig {
    /// Set the distance kernel.
    pub fn with_kernel(mut self, kernel: DistanceKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the candidate distance threshold.
    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    fn validate(&self) -> Result<()> {
        positive("linking.kernel.x", self.kernel.x)?;
        positive("linking.kernel.y", self.kernel.y)?;
        positive("linking.distance_threshold", self.distance_threshold)
    }
}

/// Noise removal and merged-line splitting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Lines with an average word area at or below this are noise
    pub min_significant_area: f64,

    /// Lower (exclusive) bound of the suspicious height band
    pub suspicious_min_height: f64,

    /// Upper (exclusive) bound of the suspicious height band
    pub suspicious_max_height: f64,

    /// Both halves of an accepted split must be strictly shorter than this
    pub single_line_ceiling: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            min_significant_area: 50.0,
            suspicious_min_height: 80.0,
            suspicious_max_height: 300.0,
            single_line_ceiling: 55.0,
        }
    }
}

impl SplitConfig {
    /// Set the significance threshold for average word area.
    pub fn with_min_significant_area(mut self, area: f64) -> Self {
        self.min_significant_area = area;
        self
    }

    /// Set the suspicious height band.
    pub fn with_suspicious_band(mut self, min_height: f64, max_height: f64) -> Self {
        self.suspicious_min_height = min_height;
        self.suspicious_max_height = max_height;
        self
    }

    /// Set the maximum height of a single line.
    pub fn with_single_line_ceiling(mut self, ceiling: f64) -> Self {
        self.single_line_ceiling = ceiling;
        self
    }

    fn validate(&self) -> Result<()> {
        non_negative("split.min_significant_area", self.min_significant_area)?;
        positive("split.single_line_ceiling", self.single_line_ceiling)?;
        ordered(
            "split.suspicious_min_height",
            self.suspicious_min_height,
            "split.suspicious_max_height",
            self.suspicious_max_height,
        )
    }
}

/// Thresholds for structural line flags. All values are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagConfig {
    /// Lower (exclusive) bound of a horizontal rule's width
    pub rule_min_width: f64,

    /// Upper (exclusive) bound of a horizontal rule's width
    pub rule_max_width: f64,

    /// A horizontal rule is strictly thinner than this
    pub rule_max_height: f64,

    /// Lower (exclusive) bound of a paragraph-start left indent
    pub paragraph_start_min: f64,

    /// Upper (exclusive) bound of a paragraph-start left indent
    pub paragraph_start_max: f64,

    /// A paragraph end has a right indent strictly above this
    pub paragraph_end_min: f64,

    /// A centered line has both indents strictly above this
    pub centered_min_indent: f64,

    /// A centered line has indents differing by strictly less than this
    pub centered_max_difference: f64,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            rule_min_width: 1280.0,
            rule_max_width: 1330.0,
            rule_max_height: 20.0,
            paragraph_start_min: 30.0,
            paragraph_start_max: 60.0,
            paragraph_end_min: 50.0,
            centered_min_indent: 50.0,
            centered_max_difference: 50.0,
        }
    }
}

impl FlagConfig {
    /// Set the horizontal rule size limits.
    pub fn with_rule_size(mut self, min_width: f64, max_width: f64, max_height: f64) -> Self {
        self.rule_min_width = min_width;
        self.rule_max_width = max_width;
        self.rule_max_height = max_height;
        self
    }

    /// Set the paragraph-start indent band.
    pub fn with_paragraph_start(mut self, min: f64, max: f64) -> Self {
        self.paragraph_start_min = min;
        self.paragraph_start_max = max;
        self
    }

    /// Set the paragraph-end indent threshold.
    pub fn with_paragraph_end(mut self, min: f64) -> Self {
        self.paragraph_end_min = min;
        self
    }

    /// Set the centered-line thresholds.
    pub fn with_centered(mut self, min_indent: f64, max_difference: f64) -> Self {
        self.centered_min_indent = min_indent;
        self.centered_max_difference = max_difference;
        self
    }

    fn validate(&self) -> Result<()> {
        ordered("flags.rule_min_width", self.rule_min_width, "flags.rule_max_width", self.rule_max_width)?;
        positive("flags.rule_max_height", self.rule_max_height)?;
        ordered(
            "flags.paragraph_start_min",
            self.paragraph_start_min,
            "flags.paragraph_start_max",
            self.paragraph_start_max,
        )?;
        non_negative("flags.paragraph_end_min", self.paragraph_end_min)?;
        non_negative("flags.centered_min_indent", self.centered_min_indent)?;
        positive("flags.centered_max_difference", self.centered_max_difference)
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be positive, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be non-negative, got {}", name, value)))
    }
}

fn ordered(low_name: &str, low: f64, high_name: &str, high: f64) -> Result<()> {
    non_negative(low_name, low)?;
    positive(high_name, high)?;
    if low < high {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} ({}) must be below {} ({})",
            low_name, low, high_name, high
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.words.min_points, 3);
        assert_eq!(config.words.min_word_area, 50.0);
        assert_eq!(config.linking.kernel, DistanceKernel::new(1.0, 1.5));
        assert_eq!(config.linking.distance_threshold, 50.0);
        assert_eq!(config.split.suspicious_min_height, 80.0);
        assert_eq!(config.split.suspicious_max_height, 300.0);
        assert_eq!(config.flags.rule_min_width, 1280.0);
        assert_eq!(config.flags.paragraph_start_max, 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = LayoutConfig::default()
            .with_linking(LinkingConfig::default().with_distance_threshold(30.0))
            .with_split(SplitConfig::default().with_suspicious_band(60.0, 200.0))
            .with_flags(FlagConfig::default().with_paragraph_start(20.0, 40.0));
        assert_eq!(config.linking.distance_threshold, 30.0);
        assert_eq!(config.split.suspicious_min_height, 60.0);
        assert_eq!(config.flags.paragraph_start_min, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LayoutConfig::from_json(r#"{"split": {"single_line_ceiling": 70}}"#).unwrap();
        assert_eq!(config.split.single_line_ceiling, 70.0);
        assert_eq!(config.split.suspicious_min_height, 80.0);
        assert_eq!(config.flags, FlagConfig::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(LayoutConfig::from_json("{oops"), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_validates() {
        let err = LayoutConfig::from_json(r#"{"split": {"suspicious_min_height": 400}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_kernel =
            LayoutConfig::default().with_linking(LinkingConfig::default().with_kernel(DistanceKernel::new(0.0, 1.5)));
        assert!(bad_kernel.validate().is_err());

        let bad_points = LayoutConfig::default().with_words(WordFilterConfig::default().with_min_points(2));
        assert!(bad_points.validate().is_err());

        let nan = LayoutConfig::default().with_flags(FlagConfig::default().with_paragraph_end(f64::NAN));
        assert!(nan.validate().is_err());

        let inverted = LayoutConfig::default().with_flags(FlagConfig::default().with_rule_size(1330.0, 1280.0, 20.0));
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_scaled() {
        let doubled = LayoutConfig::default().scaled(2.0);
        assert_eq!(doubled.linking.distance_threshold, 100.0);
        assert_eq!(doubled.linking.kernel, DistanceKernel::new(1.0, 1.5));
        assert_eq!(doubled.words.min_word_area, 200.0);
        assert_eq!(doubled.words.min_points, 3);
        assert_eq!(doubled.split.min_significant_area, 200.0);
        assert_eq!(doubled.split.single_line_ceiling, 110.0);
        assert_eq!(doubled.flags.rule_max_width, 2660.0);
        assert_eq!(doubled.flags.centered_max_difference, 100.0);
        assert!(doubled.validate().is_ok());
        assert_eq!(LayoutConfig::default().scaled(1.0), LayoutConfig::default());
    }

    #[test]
    fn test_serialize_round_trip_keeps_defaults() {
        let json = serde_json::to_string(&LayoutConfig::default()).unwrap();
        assert_eq!(LayoutConfig::from_json(&json).unwrap(), LayoutConfig::default());
    }
}
