//! Search controller — the single entry point a front end talks to.
//!
//! The controller owns the dataset, the [`SearchSession`] and the debounce
//! scheduler, and decides which notifications reach the outside world
//! through a [`SearchListener`].
//!
//! # Event flow
//!
//! | Front-end event | Controller method | Notifications |
//! |-----------------|-------------------|---------------|
//! | text typed | [`on_text_input`](SearchController::on_text_input) | `input_changed` once the filter runs |
//! | result clicked | [`on_item_click`](SearchController::on_item_click) | `selection_changed`, `selection_succeeded` |
//! | chip removed | [`on_chip_remove`](SearchController::on_chip_remove) | `selection_changed` |
//! | clear all | [`on_clear_all`](SearchController::on_clear_all) | `selection_changed` |
//! | focus | [`on_focus`](SearchController::on_focus) | `focused` |
//! | click outside | [`on_click_outside`](SearchController::on_click_outside) | none |
//!
//! With debounce enabled, typed text is filtered only after the configured
//! quiet interval. The host drives that deferred work by calling
//! [`tick`](SearchController::tick) from its event loop (using
//! [`next_deadline`](SearchController::next_deadline) as the wait timeout) or
//! by awaiting [`settle`](SearchController::settle).

use crate::config::SearchConfig;
use crate::debounce::DebounceScheduler;
use crate::field;
use crate::matcher;
use crate::selection::{InputEffect, SelectOutcome, Selection, SelectionMachine};
use crate::types::{record_identity, same_record, Record};
use serde_json::Value;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// How the focus was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusCause {
    #[default]
    Keyboard,
    Pointer,
}

/// Focus event forwarded from the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusEvent {
    pub cause: FocusCause,
}

/// Outward notifications. Every method defaults to a no-op.
pub trait SearchListener {
    /// A filter ran for `text`.
    fn input_changed(&mut self, _text: &str) {}
    /// The selection changed; carries the full current selection.
    fn selection_changed(&mut self, _selection: &Selection) {}
    /// A record was just selected (once per added item in multi mode).
    fn selection_succeeded(&mut self, _record: &Record) {}
    fn focused(&mut self, _event: &FocusEvent) {}
}

impl SearchListener for () {}

type InputFn = Box<dyn FnMut(&str)>;
type SelectionFn = Box<dyn FnMut(&Selection)>;
type RecordFn = Box<dyn FnMut(&Record)>;
type FocusFn = Box<dyn FnMut(&FocusEvent)>;

/// A [`SearchListener`] assembled from closures.
#[derive(Default)]
pub struct Callbacks {
    on_input_change: Option<InputFn>,
    on_selection_change: Option<SelectionFn>,
    on_selection_succeeded: Option<RecordFn>,
    on_focus: Option<FocusFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_input_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_input_change = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&Selection) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn on_selection_succeeded(mut self, f: impl FnMut(&Record) + 'static) -> Self {
        self.on_selection_succeeded = Some(Box::new(f));
        self
    }

    pub fn on_focus(mut self, f: impl FnMut(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }
}

impl SearchListener for Callbacks {
    fn input_changed(&mut self, text: &str) {
        if let Some(f) = self.on_input_change.as_mut() {
            f(text);
        }
    }

    fn selection_changed(&mut self, selection: &Selection) {
        if let Some(f) = self.on_selection_change.as_mut() {
            f(selection);
        }
    }

    fn selection_succeeded(&mut self, record: &Record) {
        if let Some(f) = self.on_selection_succeeded.as_mut() {
            f(record);
        }
    }

    fn focused(&mut self, event: &FocusEvent) {
        if let Some(f) = self.on_focus.as_mut() {
            f(event);
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Run-time state read by the front end.
pub struct SearchSession {
    input: String,
    results: Vec<Record>,
    open: bool,
    loading: bool,
    selection: SelectionMachine,
}

impl SearchSession {
    fn new(config: &SearchConfig) -> Self {
        Self {
            input: config.initial_input().to_string(),
            results: Vec::new(),
            open: false,
            loading: false,
            selection: SelectionMachine::from_config(config),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Results of the last filter, already stripped of selected records.
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Whether the result dropdown is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True only while a debounced filter is pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    fn apply(&mut self, effect: InputEffect) {
        match effect {
            InputEffect::Keep => {}
            InputEffect::Clear => self.input.clear(),
            InputEffect::Set(text) => self.input = text,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// A filter request waiting out the debounce interval.
struct FilterRequest {
    query: String,
}

pub struct SearchController {
    config: SearchConfig,
    dataset: Vec<Record>,
    session: SearchSession,
    scheduler: DebounceScheduler<FilterRequest>,
    listener: Box<dyn SearchListener>,
    attached: bool,
}

/// Lifecycle.
impl SearchController {
    /// Build an attached controller over `dataset`.
    pub fn new(config: SearchConfig, dataset: Vec<Record>, listener: impl SearchListener + 'static) -> Self {
        tracing::debug!(
            records = dataset.len(),
            mode = ?config.match_mode(),
            multi = config.multi_select(),
            debounce = config.debounce_enabled(),
            "controller created"
        );
        let session = SearchSession::new(&config);
        Self {
            config,
            dataset,
            session,
            scheduler: DebounceScheduler::new(),
            listener: Box::new(listener),
            attached: true,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Re-arm a detached controller with a fresh scheduler.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.scheduler = DebounceScheduler::new();
        self.attached = true;
        tracing::debug!("controller attached");
    }

    /// Tear down: the pending filter (if any) is dropped and never runs, and
    /// events are ignored until [`attach`](Self::attach).
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.scheduler.dispose();
        self.session.loading = false;
        self.attached = false;
        tracing::debug!("controller detached");
    }

    fn ensure_attached(&self, event: &'static str) -> bool {
        if !self.attached {
            tracing::warn!(event, "event ignored while detached");
        }
        self.attached
    }
}

/// Read access for the front end.
impl SearchController {
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    /// Display text for `record` using the configured display field.
    pub fn display_text(&self, record: &Record) -> String {
        field::display_text(record, self.config.display_field())
    }

    /// Replace the dataset. The next filter searches the new records.
    pub fn set_dataset(&mut self, dataset: Vec<Record>) {
        tracing::debug!(records = dataset.len(), "dataset replaced");
        self.dataset = dataset;
    }
}

/// Input and filtering.
impl SearchController {
    pub fn on_text_input(&mut self, text: impl Into<String>) {
        if !self.ensure_attached("text_input") {
            return;
        }
        let text = text.into();
        self.session.input.clone_from(&text);

        if self.config.debounce_enabled() {
            self.session.loading = true;
            self.scheduler
                .schedule(FilterRequest { query: text }, self.config.debounce_interval());
        } else {
            self.run_filter(text);
        }
    }

    /// Run the pending filter if it is due at `now`. Returns true when a
    /// filter ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.scheduler.poll_expired(now) {
            Some(request) => {
                self.run_filter(request.query);
                true
            }
            None => false,
        }
    }

    /// When the pending filter falls due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Wait for the pending filter, if any, and run it.
    pub async fn settle(&mut self) -> bool {
        match self.scheduler.expired().await {
            Some(request) => {
                self.run_filter(request.query);
                true
            }
            None => false,
        }
    }

    fn run_filter(&mut self, query: String) {
        let matched = matcher::search(&self.dataset, &query, self.config.match_options());
        let visible = self.session.selection.exclude(matched);

        self.session.results = visible.into_iter().cloned().collect();
        self.session.open = !self.session.results.is_empty();
        self.session.loading = false;

        tracing::debug!(
            query = %query,
            results = self.session.results.len(),
            open = self.session.open,
            "filter ran"
        );
        self.listener.input_changed(&query);
    }
}

/// Selection.
impl SearchController {
    /// Select the result at `index` in the current result list.
    pub fn on_item_click(&mut self, index: usize) -> bool {
        match self.session.results.get(index).cloned() {
            Some(record) => self.select(record),
            None => {
                tracing::debug!(index, "click outside result range ignored");
                false
            }
        }
    }

    /// Select `record`. Returns false when nothing changed (detached, or a
    /// duplicate in multi mode).
    pub fn select(&mut self, record: Record) -> bool {
        if !self.ensure_attached("select") {
            return false;
        }

        let input = match self.session.selection.select(record.clone()) {
            SelectOutcome::Selected { input } => input,
            SelectOutcome::Duplicate => return false,
        };

        // A filter for the text typed before the selection must not reopen
        // the dropdown afterwards.
        self.scheduler.cancel();
        self.session.loading = false;
        self.session.open = false;
        self.session.apply(input);

        if self.session.selection.is_multi() {
            self.session.results.retain(|r| !same_record(r, &record));
        }

        self.listener.selection_changed(self.session.selection.selection());
        self.listener.selection_succeeded(&record);
        true
    }

    /// Multi mode: remove the selected record identified by `id`.
    pub fn on_chip_remove(&mut self, id: &Value) -> bool {
        if !self.ensure_attached("chip_remove") {
            return false;
        }
        if self.session.selection.remove(id).is_none() {
            return false;
        }
        self.listener.selection_changed(self.session.selection.selection());
        true
    }

    /// Multi mode: remove `record` from the selection.
    pub fn remove(&mut self, record: &Record) -> bool {
        self.on_chip_remove(record_identity(record))
    }

    /// Clear the selection. Single mode also clears the input text.
    pub fn on_clear_all(&mut self) {
        if !self.ensure_attached("clear_all") {
            return;
        }
        let effect = self.session.selection.clear();
        if effect == InputEffect::Clear {
            self.scheduler.cancel();
            self.session.loading = false;
        }
        self.session.apply(effect);
        self.listener.selection_changed(self.session.selection.selection());
    }
}

/// Focus and dropdown.
impl SearchController {
    pub fn on_focus(&mut self, event: FocusEvent) {
        if !self.ensure_attached("focus") {
            return;
        }
        self.listener.focused(&event);
        let reopen = self.config.auto_complete()
            && !self.session.input.is_empty()
            && !self.session.results.is_empty();
        if reopen {
            self.session.open = true;
            tracing::debug!(results = self.session.results.len(), "dropdown reopened on focus");
        }
    }

    /// The front end detected a click outside the control.
    pub fn on_click_outside(&mut self) {
        self.close_dropdown();
    }

    pub fn close_dropdown(&mut self) {
        if self.session.open {
            tracing::debug!("dropdown closed");
        }
        self.session.open = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
