//! Test builders — a controller wired to a recording listener.
//!
//! These are for readable assertions, not production use; they panic on
//! invalid configuration.

use seekbox_core::{
    FocusEvent, Record, SearchConfig, SearchConfigBuilder, SearchController, SearchListener,
    Selection,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the controller told the outside world, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Input(String),
    Changed(Selection),
    Succeeded(Record),
    Focused,
}

/// Listener that stores every notification for later inspection.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Notice>>>);

impl Recorder {
    /// Drain the notifications received so far.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn inputs(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notice::Input(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SearchListener for Recorder {
    fn input_changed(&mut self, text: &str) {
        self.0.borrow_mut().push(Notice::Input(text.to_string()));
    }

    fn selection_changed(&mut self, selection: &Selection) {
        self.0.borrow_mut().push(Notice::Changed(selection.clone()));
    }

    fn selection_succeeded(&mut self, record: &Record) {
        self.0.borrow_mut().push(Notice::Succeeded(record.clone()));
    }

    fn focused(&mut self, _event: &FocusEvent) {
        self.0.borrow_mut().push(Notice::Focused);
    }
}

/// Fluent builder for a [`SearchController`] plus its [`Recorder`].
///
/// ```rust
/// let (controller, recorder) = ControllerBuilder::new(fruit())
///     .keys(["name"])
///     .multi()
///     .build();
/// ```
pub struct ControllerBuilder {
    dataset: Vec<Record>,
    config: SearchConfigBuilder,
}

impl ControllerBuilder {
    /// Synchronous filtering on `name` unless told otherwise.
    pub fn new(dataset: Vec<Record>) -> Self {
        Self {
            dataset,
            config: SearchConfig::builder().filter_keys(["name"]).debounce(false),
        }
    }

    pub fn keys<const N: usize>(mut self, keys: [&str; N]) -> Self {
        self.config = self.config.filter_keys(keys);
        self
    }

    pub fn multi(mut self) -> Self {
        self.config = self.config.multi_select(true);
        self
    }

    pub fn debounced(mut self, ms: i64) -> Self {
        self.config = self.config.debounce(true).debounce_interval_ms(ms);
        self
    }

    pub fn configure(mut self, f: impl FnOnce(SearchConfigBuilder) -> SearchConfigBuilder) -> Self {
        self.config = f(self.config);
        self
    }

    pub fn build(self) -> (SearchController, Recorder) {
        let recorder = Recorder::default();
        let config = self.config.build().expect("test configuration must be valid");
        let controller = SearchController::new(config, self.dataset, recorder.clone());
        (controller, recorder)
    }
}

/// Ids of `records`, as JSON values so both numeric and string ids work.
pub fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<serde_json::Value> {
    records.into_iter().map(|r| r["id"].clone()).collect()
}
