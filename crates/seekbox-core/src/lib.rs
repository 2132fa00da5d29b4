//! seekbox-core — matching, debounce and selection engine for seekbox.
//!
//! This crate holds every piece of the search control that carries a real
//! decision. Rendering lives elsewhere; a front end only reads the
//! [`SearchSession`] and forwards raw user events into the
//! [`SearchController`].
//!
//! # Architecture
//!
//! ```text
//! text ──► SearchController ──► DebounceScheduler ──► MatchEngine ──► exclusion ──► session
//!                │                                       │
//!                │                                       └──► FieldAccessor
//!                └──► SelectionMachine ──► SearchListener
//! ```
//!
//! Everything runs on the caller's thread. The only deferred work is the
//! debounced filter request, which the host drives through
//! [`SearchController::tick`] or [`SearchController::settle`].

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod field;
pub mod matcher;
pub mod selection;
pub mod types;

pub use config::{SearchConfig, SearchConfigBuilder, SearchSettings};
pub use controller::{Callbacks, FocusCause, FocusEvent, SearchController, SearchListener, SearchSession};
pub use debounce::DebounceScheduler;
pub use error::{ConfigError, Error, Result};
pub use field::{display_text, resolve};
pub use matcher::{build_filter, search, Filter, FilterOptions, FuzzyTuning, MatchMode, MatchOptions};
pub use selection::{InputEffect, SelectOutcome, Selection, SelectionMachine};
pub use types::{dataset_from_json, record_identity, same_record, FieldPath, Record, ID_KEY};
