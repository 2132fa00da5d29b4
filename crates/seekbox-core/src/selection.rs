//! Selection state machine.
//!
//! # States
//!
//! | Mode | States |
//! |------|--------|
//! | single | `Idle` ⇄ `SingleSelected(record)` |
//! | multi | `Idle` ⇄ `HasItems(ordered set)` |
//!
//! Multi mode keeps insertion order and never holds two records with the
//! same identity (see [`record_identity`](crate::types::record_identity)).
//! The machine also owns the exclusion rule: in multi mode, results that are
//! already selected are dropped before they reach the caller.
//!
//! Transitions report how the input text should change through
//! [`InputEffect`]; the controller applies it to the session.

use crate::config::SearchConfig;
use crate::field::display_text;
use crate::types::{record_identity, same_record, FieldPath, Record};
use serde_json::Value;

/// The current selection, in the shape of the configured mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Single(Option<Record>),
    Multi(Vec<Record>),
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(record) => record.is_none(),
            Selection::Multi(records) => records.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Single(record) => usize::from(record.is_some()),
            Selection::Multi(records) => records.len(),
        }
    }

    /// Selected records in order.
    pub fn records(&self) -> &[Record] {
        match self {
            Selection::Single(record) => record.as_slice(),
            Selection::Multi(records) => records,
        }
    }

    pub fn contains(&self, record: &Record) -> bool {
        self.records().iter().any(|r| same_record(r, record))
    }
}

/// What a transition does to the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEffect {
    Keep,
    Clear,
    Set(String),
}

/// Result of [`SelectionMachine::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected { input: InputEffect },
    /// Multi mode: a record with the same identity is already selected.
    Duplicate,
}

pub struct SelectionMachine {
    selection: Selection,
    display_field: FieldPath,
    clear_input_on_select: bool,
}

impl SelectionMachine {
    pub fn new(multi_select: bool, display_field: FieldPath, clear_input_on_select: bool) -> Self {
        let selection = if multi_select {
            Selection::Multi(Vec::new())
        } else {
            Selection::Single(None)
        };
        Self {
            selection,
            display_field,
            clear_input_on_select,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(
            config.multi_select(),
            config.display_field().clone(),
            config.clear_input_on_select(),
        )
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.selection, Selection::Multi(_))
    }

    pub fn select(&mut self, record: Record) -> SelectOutcome {
        if self.is_multi() && self.selection.contains(&record) {
            tracing::debug!(id = %record_identity(&record), "selection: duplicate rejected");
            return SelectOutcome::Duplicate;
        }
        match &mut self.selection {
            Selection::Single(current) => {
                let input = if self.clear_input_on_select {
                    InputEffect::Clear
                } else {
                    InputEffect::Set(display_text(&record, &self.display_field))
                };
                tracing::debug!(id = %record_identity(&record), "selection: single selected");
                *current = Some(record);
                SelectOutcome::Selected { input }
            }
            Selection::Multi(records) => {
                tracing::debug!(
                    id = %record_identity(&record),
                    count = records.len() + 1,
                    "selection: item added"
                );
                records.push(record);
                SelectOutcome::Selected {
                    input: InputEffect::Clear,
                }
            }
        }
    }

    /// Multi mode only: drop the record whose identity equals `id`.
    /// Returns the removed record; `None` when absent or in single mode.
    pub fn remove(&mut self, id: &Value) -> Option<Record> {
        let Selection::Multi(records) = &mut self.selection else {
            return None;
        };
        let position = records.iter().position(|r| record_identity(r) == id)?;
        let removed = records.remove(position);
        tracing::debug!(%id, count = records.len(), "selection: item removed");
        Some(removed)
    }

    /// Return to `Idle`. Single mode also clears the input text.
    pub fn clear(&mut self) -> InputEffect {
        match &mut self.selection {
            Selection::Single(current) => {
                *current = None;
                tracing::debug!("selection: single cleared");
                InputEffect::Clear
            }
            Selection::Multi(records) => {
                records.clear();
                tracing::debug!("selection: all items cleared");
                InputEffect::Keep
            }
        }
    }

    /// Multi mode: drop results that are already selected. Single mode
    /// passes results through untouched.
    pub fn exclude<'a>(&self, mut results: Vec<&'a Record>) -> Vec<&'a Record> {
        if self.is_multi() && !self.selection.is_empty() {
            results.retain(|candidate| !self.selection.contains(candidate));
        }
        results
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
