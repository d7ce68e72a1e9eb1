//! # Analyzer Configuration Module
//!
//! This module provides the tuning knobs for insight derivation: summary
//! length, the minimum body size worth summarizing, and the bounds on key
//! points and action items. It uses a builder pattern for flexible
//! configuration.
//!
//! ## Key Components
//!
//! - `AnalyzeOptions`: The main configuration struct with analysis bounds
//! - `AnalyzeOptionsBuilder`: Builder pattern implementation for easier configuration
//!
//! ## Features
//!
//! - Defaults suitable for typical article-length pages
//! - Independent control of summary, key-point, and action-item limits
//! - Length bands to filter out fragments and run-on candidates

/// Configuration for page analysis
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Maximum length of the summary in characters
    pub max_summary_chars: usize,

    /// Minimum body length in characters before a real summary is attempted
    pub min_body_chars: usize,

    /// Maximum number of key points to keep
    pub max_key_points: usize,

    /// Minimum length of a key point in characters
    pub min_key_point_chars: usize,

    /// Maximum length of a key point in characters
    pub max_key_point_chars: usize,

    /// Maximum number of action items to keep
    pub max_action_items: usize,

    /// Minimum length of an action item in characters
    pub min_action_chars: usize,

    /// Maximum length of an action item in characters
    pub max_action_chars: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_summary_chars: 320,
            min_body_chars: 40,
            max_key_points: 5,
            min_key_point_chars: 40,
            max_key_point_chars: 220,
            max_action_items: 6,
            min_action_chars: 12,
            max_action_chars: 180,
        }
    }
}

/// Builder for AnalyzeOptions
#[derive(Debug, Default)]
pub struct AnalyzeOptionsBuilder {
    options: AnalyzeOptions,
}

impl AnalyzeOptionsBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self {
            options: AnalyzeOptions::default(),
        }
    }

    /// Set the maximum summary length in characters
    pub fn max_summary_chars(mut self, max_summary_chars: usize) -> Self {
        self.options.max_summary_chars = max_summary_chars;
        self
    }

    /// Set the minimum body length required for a real summary
    pub fn min_body_chars(mut self, min_body_chars: usize) -> Self {
        self.options.min_body_chars = min_body_chars;
        self
    }

    /// Set the maximum number of key points
    pub fn max_key_points(mut self, max_key_points: usize) -> Self {
        self.options.max_key_points = max_key_points;
        self
    }

    /// Set the accepted key-point length band in characters
    pub fn key_point_chars(mut self, min: usize, max: usize) -> Self {
        self.options.min_key_point_chars = min;
        self.options.max_key_point_chars = max;
        self
    }

    /// Set the maximum number of action items
    pub fn max_action_items(mut self, max_action_items: usize) -> Self {
        self.options.max_action_items = max_action_items;
        self
    }

    /// Set the accepted action-item length band in characters
    pub fn action_chars(mut self, min: usize, max: usize) -> Self {
        self.options.min_action_chars = min;
        self.options.max_action_chars = max;
        self
    }

    /// Build the options
    pub fn build(self) -> AnalyzeOptions {
        self.options
    }
}

impl AnalyzeOptions {
    /// Create a new builder
    pub fn builder() -> AnalyzeOptionsBuilder {
        AnalyzeOptionsBuilder::new()
    }
}
