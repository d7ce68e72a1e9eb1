//! Summary and key-point derivation for the analyzer
//!
//! Reduces extracted body text to a bounded single-paragraph summary and a
//! bounded list of key points. Selection is a deterministic order-preserving
//! filter over sentence units, so repeated calls on the same text always
//! produce the same output.

use crate::analyzer::AnalyzeOptions;
use std::collections::HashSet;

/// Summary returned when the body text is too short to be worth summarizing
pub const EMPTY_SUMMARY_PLACEHOLDER: &str = "Not enough readable content to summarize yet.";

/// Sentences containing these markers are treated as boilerplate, not content
const BOILERPLATE_MARKERS: [&str; 11] = [
    "cookie",
    "subscribe",
    "sign up",
    "sign in",
    "log in",
    "newsletter",
    "all rights reserved",
    "privacy policy",
    "terms of service",
    "advertisement",
    "enable javascript",
];

/// Derive the bounded summary paragraph from body text.
///
/// Leading sentences are accumulated up to the character budget, so the
/// summary ends at a sentence boundary whenever at least one sentence fits.
/// An oversized first sentence is truncated on a char boundary instead.
pub(crate) fn summarize(body: &str, options: &AnalyzeOptions) -> String {
    if body.chars().count() < options.min_body_chars {
        return EMPTY_SUMMARY_PLACEHOLDER.to_string();
    }

    let mut summary = String::new();
    let mut summary_chars = 0;
    for sentence in split_sentences(body) {
        let sentence_chars = sentence.chars().count();
        let separator = usize::from(!summary.is_empty());
        if summary_chars + separator + sentence_chars > options.max_summary_chars {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(&sentence);
        summary_chars += separator + sentence_chars;
    }

    if summary.is_empty() {
        // The first sentence alone overruns the budget
        let truncated: String = body
            .chars()
            .take(options.max_summary_chars.saturating_sub(1))
            .collect();
        summary = format!("{}…", truncated.trim_end());
    }

    summary
}

/// Select key points: sentences inside the configured length band that are
/// not boilerplate, deduplicated under case/whitespace normalization, in
/// document order, capped at the configured maximum.
pub(crate) fn extract_key_points(body: &str, options: &AnalyzeOptions) -> Vec<String> {
    if body.chars().count() < options.min_body_chars {
        return Vec::new();
    }

    let mut points = Vec::new();
    let mut seen = HashSet::new();
    for sentence in split_sentences(body) {
        if points.len() >= options.max_key_points {
            break;
        }

        let len = sentence.chars().count();
        if len < options.min_key_point_chars || len > options.max_key_point_chars {
            continue;
        }

        let normalized = normalize_unit(&sentence);
        if BOILERPLATE_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
        {
            continue;
        }
        if !seen.insert(normalized) {
            continue;
        }

        points.push(sentence);
    }

    points
}

/// Split body text into sentence units, line by line.
///
/// A sentence ends at `.`, `!`, or `?` followed by whitespace; line breaks
/// always end a unit. Good enough for heuristic selection, not a linguistic
/// segmenter.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        let mut start = 0;
        let mut after_terminal = false;
        for (index, ch) in line.char_indices() {
            if after_terminal && ch.is_whitespace() {
                let sentence = line[start..index].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = index;
            }
            if matches!(ch, '.' | '!' | '?') {
                after_terminal = true;
            } else if !ch.is_whitespace() {
                after_terminal = false;
            }
        }
        let tail = line[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }
    sentences
}

/// Case-fold and collapse whitespace for duplicate detection
pub(crate) fn normalize_unit(unit: &str) -> String {
    unit.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
