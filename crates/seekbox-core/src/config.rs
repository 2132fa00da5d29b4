//! Configuration for a search control.
//!
//! [`SearchConfig`] is the validated, immutable bundle handed to a
//! [`SearchController`](crate::SearchController). It can be produced three
//! ways:
//!
//! - [`SearchConfig::builder`] for programmatic setup,
//! - [`SearchConfig::load`] / [`SearchConfig::from_toml_str`], which layer a
//!   TOML document over the embedded defaults,
//! - [`SearchConfig::defaults`], the embedded defaults alone.
//!
//! Every path goes through the same validation; invalid values are rejected
//! with a [`ConfigError`], never clamped.

use crate::error::ConfigError;
use crate::matcher::{FuzzyTuning, MatchMode, MatchOptions};
use crate::types::FieldPath;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
[search]
filter_keys   = []
display_field = "name"
case_sensitive = false
mode          = "exact"
sort_results  = false

[search.fuzzy]
threshold             = 0.4
ignore_location       = true
location              = 0
distance              = 100
min_match_char_length = 1

[input]
initial_input        = ""
debounce             = true
debounce_interval_ms = 200
auto_complete        = true

[selection]
multi_select          = false
clear_input_on_select = false
"#;

// ---------------------------------------------------------------------------
// Raw settings — mirror the TOML structure
// ---------------------------------------------------------------------------

/// Unvalidated settings as they appear in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub search: MatchSettings,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub filter_keys: Vec<FieldPath>,
    pub display_field: FieldPath,
    pub case_sensitive: bool,
    pub mode: MatchMode,
    pub sort_results: bool,
    pub fuzzy: FuzzyTuning,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            filter_keys: Vec::new(),
            display_field: FieldPath::default(),
            case_sensitive: false,
            mode: MatchMode::Exact,
            sort_results: false,
            fuzzy: FuzzyTuning::default(),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Text the input box starts with. No filter runs until the user types.
    pub initial_input: String,
    pub debounce: bool,
    /// Signed so that a negative value can be reported instead of wrapping.
    pub debounce_interval_ms: i64,
    /// Re-open the result list on focus when input and cached results exist.
    pub auto_complete: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            initial_input: String::new(),
            debounce: true,
            debounce_interval_ms: 200,
            auto_complete: true,
        }
    }
}

/// `[selection]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    pub multi_select: bool,
    /// Single mode only: clear the input after a selection instead of
    /// showing the selected record's display value.
    pub clear_input_on_select: bool,
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Validated configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    matching: MatchOptions,
    display_field: FieldPath,
    initial_input: String,
    debounce_enabled: bool,
    debounce_interval: Duration,
    auto_complete: bool,
    multi_select: bool,
    clear_input_on_select: bool,
}

impl TryFrom<SearchSettings> for SearchConfig {
    type Error = ConfigError;

    fn try_from(settings: SearchSettings) -> Result<Self, Self::Error> {
        let SearchSettings {
            search,
            input,
            selection,
        } = settings;

        if input.debounce_interval_ms < 0 {
            return Err(ConfigError::NegativeDebounceInterval(input.debounce_interval_ms));
        }
        search.fuzzy.validate()?;

        Ok(Self {
            matching: MatchOptions {
                keys: search.filter_keys,
                case_sensitive: search.case_sensitive,
                mode: search.mode,
                sort_results: search.sort_results,
                fuzzy: search.fuzzy,
            },
            display_field: search.display_field,
            initial_input: input.initial_input,
            debounce_enabled: input.debounce,
            debounce_interval: Duration::from_millis(input.debounce_interval_ms.unsigned_abs()),
            auto_complete: input.auto_complete,
            multi_select: selection.multi_select,
            clear_input_on_select: selection.clear_input_on_select,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// The embedded defaults, without touching the filesystem.
    pub fn defaults() -> Self {
        // The embedded defaults are part of the source; a failure here is a
        // build-time mistake, not a runtime condition.
        Self::from_toml_str("").expect("embedded default settings must be valid")
    }

    /// Layer `toml` over the embedded defaults and validate.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings: SearchSettings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::try_from(settings)
    }

    /// Layer the TOML file at `path` over the embedded defaults and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading search settings");
        let settings: SearchSettings = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::try_from(settings)
    }

    /// Start a builder pre-filled with this configuration, for overrides.
    pub fn into_builder(self) -> SearchConfigBuilder {
        SearchConfigBuilder {
            settings: SearchSettings {
                search: MatchSettings {
                    filter_keys: self.matching.keys,
                    display_field: self.display_field,
                    case_sensitive: self.matching.case_sensitive,
                    mode: self.matching.mode,
                    sort_results: self.matching.sort_results,
                    fuzzy: self.matching.fuzzy,
                },
                input: InputSettings {
                    initial_input: self.initial_input,
                    debounce: self.debounce_enabled,
                    debounce_interval_ms: i64::try_from(self.debounce_interval.as_millis())
                        .unwrap_or(i64::MAX),
                    auto_complete: self.auto_complete,
                },
                selection: SelectionSettings {
                    multi_select: self.multi_select,
                    clear_input_on_select: self.clear_input_on_select,
                },
            },
        }
    }

    pub fn match_options(&self) -> &MatchOptions {
        &self.matching
    }

    pub fn filter_keys(&self) -> &[FieldPath] {
        &self.matching.keys
    }

    pub fn case_sensitive(&self) -> bool {
        self.matching.case_sensitive
    }

    pub fn match_mode(&self) -> MatchMode {
        self.matching.mode
    }

    pub fn sort_results(&self) -> bool {
        self.matching.sort_results
    }

    pub fn fuzzy(&self) -> &FuzzyTuning {
        &self.matching.fuzzy
    }

    /// Field whose value represents a record in the input and in chips.
    pub fn display_field(&self) -> &FieldPath {
        &self.display_field
    }

    pub fn initial_input(&self) -> &str {
        &self.initial_input
    }

    pub fn debounce_enabled(&self) -> bool {
        self.debounce_enabled
    }

    pub fn debounce_interval(&self) -> Duration {
        self.debounce_interval
    }

    pub fn auto_complete(&self) -> bool {
        self.auto_complete
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn clear_input_on_select(&self) -> bool {
        self.clear_input_on_select
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SearchConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    settings: SearchSettings,
}

impl From<SearchSettings> for SearchConfigBuilder {
    fn from(settings: SearchSettings) -> Self {
        Self { settings }
    }
}

impl SearchConfigBuilder {
    pub fn filter_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldPath>,
    {
        self.settings.search.filter_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_field(mut self, field: impl Into<FieldPath>) -> Self {
        self.settings.search.display_field = field.into();
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.settings.search.case_sensitive = yes;
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.settings.search.mode = mode;
        self
    }

    pub fn sort_results(mut self, yes: bool) -> Self {
        self.settings.search.sort_results = yes;
        self
    }

    pub fn fuzzy(mut self, tuning: FuzzyTuning) -> Self {
        self.settings.search.fuzzy = tuning;
        self
    }

    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.settings.search.fuzzy.threshold = threshold;
        self
    }

    pub fn initial_input(mut self, text: impl Into<String>) -> Self {
        self.settings.input.initial_input = text.into();
        self
    }

    pub fn debounce(mut self, enabled: bool) -> Self {
        self.settings.input.debounce = enabled;
        self
    }

    pub fn debounce_interval_ms(mut self, ms: i64) -> Self {
        self.settings.input.debounce_interval_ms = ms;
        self
    }

    pub fn auto_complete(mut self, yes: bool) -> Self {
        self.settings.input.auto_complete = yes;
        self
    }

    pub fn multi_select(mut self, yes: bool) -> Self {
        self.settings.selection.multi_select = yes;
        self
    }

    pub fn clear_input_on_select(mut self, yes: bool) -> Self {
        self.settings.selection.clear_input_on_select = yes;
        self
    }

    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        SearchConfig::try_from(self.settings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_load() {
        let cfg = SearchConfig::defaults();
        assert!(cfg.filter_keys().is_empty());
        assert_eq!(cfg.display_field(), &FieldPath::from("name"));
        assert_eq!(cfg.match_mode(), MatchMode::Exact);
        assert!(!cfg.case_sensitive());
        assert_eq!(cfg.initial_input(), "");
        assert!(cfg.debounce_enabled());
        assert_eq!(cfg.debounce_interval(), Duration::from_millis(200));
        assert!(cfg.auto_complete());
        assert!(!cfg.multi_select());
        assert_eq!(cfg.fuzzy().threshold, 0.4);
        assert!(cfg.fuzzy().ignore_location);
    }

    #[test]
    fn builder_matches_embedded_defaults() {
        assert_eq!(SearchConfig::builder().build().unwrap(), SearchConfig::defaults());
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg = SearchConfig::from_toml_str(
            r#"
            [search]
            filter_keys = ["name", ["meta", "full.title"]]
            mode = "fuzzy"

            [search.fuzzy]
            threshold = 0.25

            [selection]
            multi_select = true
            "#,
        )
        .unwrap();

        assert_eq!(
            cfg.filter_keys(),
            &[FieldPath::from("name"), FieldPath::from(["meta", "full.title"])]
        );
        assert_eq!(cfg.match_mode(), MatchMode::Fuzzy);
        assert_eq!(cfg.fuzzy().threshold, 0.25);
        assert_eq!(cfg.fuzzy().distance, 100);
        assert!(cfg.multi_select());
        assert!(cfg.debounce_enabled());
    }

    #[test]
    fn negative_debounce_is_rejected() {
        let err = SearchConfig::builder().debounce_interval_ms(-5).build().unwrap_err();
        assert!(matches!(err, ConfigError::NegativeDebounceInterval(-5)));

        let err = SearchConfig::from_toml_str("[input]\ndebounce_interval_ms = -1").unwrap_err();
        assert!(matches!(err, ConfigError::NegativeDebounceInterval(-1)));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = SearchConfig::builder().fuzzy_threshold(-0.1).build().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOutOfRange(_)));
    }

    #[test]
    fn malformed_toml_is_a_load_error() {
        let err = SearchConfig::from_toml_str("[search\nmode = ").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\nfilter_keys = [\"title\"]\ncase_sensitive = true").unwrap();

        let cfg = SearchConfig::load(file.path()).unwrap();
        assert_eq!(cfg.filter_keys(), &[FieldPath::from("title")]);
        assert!(cfg.case_sensitive());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn into_builder_round_trips() {
        let cfg = SearchConfig::builder()
            .filter_keys(["a.b"])
            .multi_select(true)
            .initial_input("ap")
            .debounce_interval_ms(50)
            .build()
            .unwrap();
        let rebuilt = cfg.clone().into_builder().build().unwrap();
        assert_eq!(cfg, rebuilt);
    }
}
