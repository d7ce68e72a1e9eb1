//! Call-to-action extraction for the analyzer
//!
//! Scans sentence units for imperative phrasing and returns a bounded,
//! deduplicated list of action phrases suitable for promotion into tracked
//! tasks. An empty result is a valid outcome, not an error.

use crate::analyzer::AnalyzeOptions;
use crate::analyzer::summary::{normalize_unit, split_sentences};
use std::collections::HashSet;

/// Verbs that mark a unit as imperative when they lead it
const IMPERATIVE_VERBS: [&str; 40] = [
    "add", "apply", "avoid", "book", "build", "check", "click", "configure", "contact", "create",
    "download", "enable", "ensure", "explore", "fix", "follow", "get", "install", "join", "learn",
    "make", "migrate", "read", "register", "remove", "review", "run", "schedule", "set", "share",
    "sign", "start", "submit", "test", "try", "update", "upgrade", "use", "verify", "visit",
];

/// Phrases that mark a unit as a call to action wherever they appear
const CTA_MARKERS: [&str; 7] = [
    "you should",
    "you must",
    "you need to",
    "be sure to",
    "make sure",
    "remember to",
    "don't forget",
];

/// Extract action phrases from body text.
///
/// A unit qualifies when, after any leading list marker is stripped, it
/// starts with an imperative verb or contains a call-to-action phrase.
/// Duplicates are collapsed to the first occurrence under case/whitespace
/// normalization, and the result is capped at the configured maximum.
pub(crate) fn extract_actions(body: &str, options: &AnalyzeOptions) -> Vec<String> {
    let mut actions = Vec::new();
    let mut seen = HashSet::new();
    for unit in split_sentences(body) {
        if actions.len() >= options.max_action_items {
            break;
        }

        let unit = strip_list_marker(&unit);
        let len = unit.chars().count();
        if len < options.min_action_chars || len > options.max_action_chars {
            continue;
        }

        let normalized = normalize_unit(unit);
        if !is_action(&normalized) {
            continue;
        }
        if !seen.insert(normalized) {
            continue;
        }

        actions.push(unit.to_string());
    }

    actions
}

/// Drop a leading bullet or numbered-list marker
fn strip_list_marker(unit: &str) -> &str {
    let trimmed = unit.trim_start_matches(['-', '*', '•', '·', '‣']);
    if trimmed.len() != unit.len() {
        return trimmed.trim_start();
    }

    // Numbered markers: digits followed by '.' or ')'
    let digits = unit.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &unit[digits..];
        if let Some(rest) = rest.strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
    }

    unit
}

fn is_action(normalized: &str) -> bool {
    if CTA_MARKERS.iter().any(|marker| normalized.contains(marker)) {
        return true;
    }

    normalized
        .split_whitespace()
        .next()
        .is_some_and(|first| IMPERATIVE_VERBS.contains(&first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> AnalyzeOptions {
        AnalyzeOptions::default()
    }

    #[test]
    fn test_detects_modal_call_to_action() {
        let body = "The migration window opens on Monday.\n\
                    You should migrate the database before Friday.";

        let actions = extract_actions(body, &options());
        assert_eq!(actions, vec!["You should migrate the database before Friday."]);
    }

    #[test]
    fn test_detects_leading_imperative_verb() {
        let body = "Install the CLI with your package manager.\n\
                    The CLI is written in Rust and ships as a static binary.";

        let actions = extract_actions(body, &options());
        assert_eq!(actions, vec!["Install the CLI with your package manager."]);
    }

    #[test]
    fn test_strips_list_markers() {
        let body = "- Review the open incidents before the handoff meeting.\n\
                    2. Update the runbook with the new escalation path.";

        let actions = extract_actions(body, &options());
        assert_eq!(
            actions,
            vec![
                "Review the open incidents before the handoff meeting.",
                "Update the runbook with the new escalation path."
            ]
        );
    }

    #[test]
    fn test_dedupes_case_insensitively() {
        let body = "Check the audit log for anomalies.\n\
                    check   the audit log for anomalies.";

        let actions = extract_actions(body, &options());
        assert_eq!(actions, vec!["Check the audit log for anomalies."]);
    }

    #[test]
    fn test_length_filter_and_cap() {
        let long_tail = "with a clause that keeps going well past any reasonable length "
            .repeat(4);
        let body = format!(
            "Run it.\nVerify the checksum {long_tail}.\n{}",
            (0..10)
                .map(|i| format!("Update component number {i} to the latest release."))
                .collect::<Vec<_>>()
                .join("\n")
        );

        let actions = extract_actions(&body, &options());
        assert_eq!(actions.len(), options().max_action_items);
        assert!(actions.iter().all(|a| a.starts_with("Update component")));
    }

    #[test]
    fn test_no_candidates_is_empty() {
        let body = "The weather was mild for the season. Nothing here tells anyone to do anything.";
        assert!(extract_actions(body, &options()).is_empty());
    }
}
