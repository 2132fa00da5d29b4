//! seekbox — an embeddable search-input control.
//!
//! The control is split the same way on every front end:
//!
//! ```text
//! records.json ──► SearchController ──► SearchSession ──► renderer (TUI / headless)
//!                      │        ▲
//!                      ▼        │
//!               MatchEngine  SelectionMachine
//! ```
//!
//! [`seekbox_core`] holds the engine, [`seekbox_tui`] the terminal renderer,
//! and [`headless`] the one-shot search used by `seekbox --query`.

pub mod headless;

pub use seekbox_core as core;
pub use seekbox_tui as tui;
