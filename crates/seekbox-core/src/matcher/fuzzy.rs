//! Approximate substring scorer.
//!
//! For a pattern of `m` characters and a field of `n` characters this finds
//! the fewest edits needed to turn the pattern into *some* substring of the
//! field (free start, free end), using a single-row dynamic program in
//! O(m·n) time. The score of a match is `errors / m`, plus a positional
//! penalty `|start - location| / distance` when location is weighted.

use super::{fold, FuzzyTuning, MatchOptions};
use crate::field::resolve_str;
use crate::types::Record;

pub(super) fn search<'a>(dataset: &'a [Record], query: &str, options: &MatchOptions) -> Vec<&'a Record> {
    let tuning = &options.fuzzy;
    let pattern: Vec<char> = fold(query, options.case_sensitive).chars().collect();
    if pattern.len() < tuning.min_match_char_length.max(1) {
        return Vec::new();
    }

    let mut scored: Vec<(f64, usize, &Record)> = dataset
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            options
                .keys
                .iter()
                .filter_map(|key| resolve_str(record, key))
                .filter_map(|text| {
                    let text: Vec<char> = fold(text, options.case_sensitive).chars().collect();
                    score(&pattern, &text, tuning)
                })
                .min_by(f64::total_cmp)
                .map(|best| (best, index, record))
        })
        .collect();

    // Stable on ties: equal scores keep dataset order.
    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, record)| record).collect()
}

/// Score `pattern` against `text`. Returns `None` when the best placement is
/// above the tuning threshold. Both inputs must already be case-folded.
pub fn score(pattern: &[char], text: &[char], tuning: &FuzzyTuning) -> Option<f64> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }

    if tuning.ignore_location && contains(text, pattern) {
        return Some(0.0);
    }

    let best = best_placement(pattern, text, tuning);
    (best <= tuning.threshold).then_some(best)
}

fn contains(text: &[char], pattern: &[char]) -> bool {
    pattern.len() <= text.len() && text.windows(pattern.len()).any(|w| w == pattern)
}

/// Lowest score over every end position in `text`.
///
/// `cost[j]` holds the edit distance between `pattern[..j]` and the best
/// substring of `text` ending at the current column; `start[j]` remembers
/// where that substring began so the positional penalty can be applied.
fn best_placement(pattern: &[char], text: &[char], tuning: &FuzzyTuning) -> f64 {
    let m = pattern.len();
    let mut cost: Vec<usize> = (0..=m).collect();
    let mut start: Vec<usize> = vec![0; m + 1];
    let mut best = placement_score(cost[m], start[m], m, tuning);

    for (i, &tc) in text.iter().enumerate() {
        let mut diag_cost = cost[0];
        let mut diag_start = start[0];
        cost[0] = 0;
        start[0] = i + 1;

        for j in 1..=m {
            let up_cost = cost[j];
            let up_start = start[j];

            let substitute = diag_cost + usize::from(pattern[j - 1] != tc);
            let skip_text = up_cost + 1;
            let skip_pattern = cost[j - 1] + 1;

            let (c, s) = if substitute <= skip_text && substitute <= skip_pattern {
                (substitute, diag_start)
            } else if skip_text <= skip_pattern {
                (skip_text, up_start)
            } else {
                (skip_pattern, start[j - 1])
            };

            diag_cost = up_cost;
            diag_start = up_start;
            cost[j] = c;
            start[j] = s;
        }

        let candidate = placement_score(cost[m], start[m], m, tuning);
        if candidate < best {
            best = candidate;
        }
    }

    best
}

fn placement_score(errors: usize, start: usize, m: usize, tuning: &FuzzyTuning) -> f64 {
    let accuracy = errors as f64 / m as f64;
    if tuning.ignore_location {
        return accuracy;
    }
    let proximity = start.abs_diff(tuning.location) as f64;
    accuracy + proximity / tuning.distance.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn default_score(pattern: &str, text: &str) -> Option<f64> {
        score(&chars(pattern), &chars(text), &FuzzyTuning::default())
    }

    #[test]
    fn exact_substring_scores_zero() {
        assert_eq!(default_score("ana", "banana"), Some(0.0));
    }

    #[test]
    fn one_substitution() {
        let s = default_score("aple", "xxapqexx").unwrap();
        assert!((s - 0.25).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn one_insertion_in_text() {
        // "banana" inside "bandana" needs the 'd' dropped
        let s = default_score("banana", "bandana").unwrap();
        assert!((s - 1.0 / 6.0).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // two edits over five characters is exactly 0.4
        let s = default_score("abcde", "abxye").unwrap();
        assert!((s - 0.4).abs() < 1e-9);
        assert_eq!(default_score("abcde", "axyze"), None);
    }

    #[test]
    fn empty_pattern_never_matches() {
        assert_eq!(default_score("", "anything"), None);
    }

    #[test]
    fn empty_text_only_matches_at_full_threshold() {
        assert_eq!(default_score("abc", ""), None);
        let lenient = FuzzyTuning {
            threshold: 1.0,
            ..FuzzyTuning::default()
        };
        assert_eq!(score(&chars("abc"), &[], &lenient), Some(1.0));
    }

    #[test]
    fn location_penalises_late_matches() {
        let weighted = FuzzyTuning {
            ignore_location: false,
            location: 0,
            distance: 10,
            ..FuzzyTuning::default()
        };
        let early = score(&chars("cat"), &chars("cat........"), &weighted).unwrap();
        let late = score(&chars("cat"), &chars("...cat"), &weighted).unwrap();
        assert_eq!(early, 0.0);
        assert!((late - 0.3).abs() < 1e-9, "late score was {late}");
        assert_eq!(score(&chars("cat"), &chars("..........cat"), &weighted), None);
    }
}
