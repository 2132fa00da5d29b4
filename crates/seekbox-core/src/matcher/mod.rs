//! Match engine — turns a query into an ordered list of matching records.
//!
//! Two strategies share one entry point, [`search`]:
//!
//! | Mode | A record matches when | Order |
//! |------|-----------------------|-------|
//! | [`MatchMode::Exact`] | any key resolves to a string containing the query | dataset order |
//! | [`MatchMode::Fuzzy`] | any key resolves to a string within the fuzzy threshold | best score first |
//!
//! An empty query never matches. Keys that resolve to anything other than a
//! string are skipped, and an empty key list matches nothing.
//!
//! The engine holds no state between calls: the dataset, query and options
//! are passed in every time, so a replaced dataset is picked up by the very
//! next search.

mod fuzzy;

use crate::error::ConfigError;
use crate::field::resolve_str;
use crate::types::{FieldPath, Record};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Matching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Literal substring match.
    #[default]
    Exact,
    /// Approximate substring match scored by edit distance.
    Fuzzy,
}

/// Tuning knobs for [`MatchMode::Fuzzy`].
///
/// Scores run from `0.0` (perfect) to `1.0` (nothing in common).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyTuning {
    /// Highest score that still counts as a match.
    pub threshold: f64,
    /// When true the match position inside the field carries no weight.
    pub ignore_location: bool,
    /// Character offset where a match is expected. Only used when
    /// `ignore_location` is false.
    pub location: usize,
    /// How far from `location` a match may start before its score is
    /// pushed past `1.0`. Only used when `ignore_location` is false.
    pub distance: usize,
    /// Queries shorter than this (in characters) never match.
    pub min_match_char_length: usize,
}

impl Default for FuzzyTuning {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            ignore_location: true,
            location: 0,
            distance: 100,
            min_match_char_length: 1,
        }
    }
}

impl FuzzyTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if !self.ignore_location && self.distance == 0 {
            return Err(ConfigError::ZeroDistance);
        }
        Ok(())
    }
}

/// Everything [`search`] needs besides the dataset and query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Fields searched in every record. A record matches if any of them does.
    pub keys: Vec<FieldPath>,
    pub case_sensitive: bool,
    pub mode: MatchMode,
    /// Exact mode only: order matches by the earliest offset of the query
    /// inside any key. Fuzzy results are already ordered by score.
    pub sort_results: bool,
    pub fuzzy: FuzzyTuning,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Run `query` against `dataset`. Returns borrowed records in result order.
pub fn search<'a>(dataset: &'a [Record], query: &str, options: &MatchOptions) -> Vec<&'a Record> {
    if query.is_empty() || options.keys.is_empty() {
        return Vec::new();
    }

    let results = match options.mode {
        MatchMode::Exact => exact(dataset, query, options),
        MatchMode::Fuzzy => fuzzy::search(dataset, query, options),
    };

    tracing::trace!(
        mode = ?options.mode,
        query,
        candidates = dataset.len(),
        matched = results.len(),
        "search complete"
    );
    results
}

fn exact<'a>(dataset: &'a [Record], query: &str, options: &MatchOptions) -> Vec<&'a Record> {
    let needle = fold(query, options.case_sensitive);

    let mut hits: Vec<(usize, &Record)> = dataset
        .iter()
        .filter_map(|record| {
            options
                .keys
                .iter()
                .filter_map(|key| resolve_str(record, key))
                .filter_map(|text| first_offset(text, &needle, options.case_sensitive))
                .min()
                .map(|offset| (offset, record))
        })
        .collect();

    if options.sort_results {
        hits.sort_by_key(|(offset, _)| *offset);
    }

    hits.into_iter().map(|(_, record)| record).collect()
}

/// Character offset of the first occurrence of `needle` in `text`.
/// `needle` must already be folded.
fn first_offset(text: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    let haystack = fold(text, case_sensitive);
    let byte = haystack.find(needle)?;
    Some(haystack[..byte].chars().count())
}

pub(crate) fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Standalone filter
// ---------------------------------------------------------------------------

/// Options accepted by [`build_filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub case_sensitive: bool,
    pub mode: MatchMode,
    pub sort_results: bool,
}

/// A prepared query that can be applied to any dataset without a session.
#[derive(Debug, Clone)]
pub struct Filter {
    query: String,
    options: MatchOptions,
}

impl Filter {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn apply<'a>(&self, dataset: &'a [Record]) -> Vec<&'a Record> {
        search(dataset, &self.query, &self.options)
    }
}

/// Prepare `query` over `keys` for repeated use, with the same semantics as
/// [`search`] and the default fuzzy tuning.
pub fn build_filter<I, K>(query: impl Into<String>, keys: I, options: FilterOptions) -> Filter
where
    I: IntoIterator<Item = K>,
    K: Into<FieldPath>,
{
    Filter {
        query: query.into(),
        options: MatchOptions {
            keys: keys.into_iter().map(Into::into).collect(),
            case_sensitive: options.case_sensitive,
            mode: options.mode,
            sort_results: options.sort_results,
            fuzzy: FuzzyTuning::default(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
