//! seekbox TUI — a ratatui front end for the search controller.
//!
//! The crate only renders and translates terminal events; every search and
//! selection decision is made by [`seekbox_core::SearchController`].

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;

use seekbox_core::{SearchController, Selection};

/// Run the interactive control until the user quits and return the final
/// selection.
pub fn run(controller: SearchController, theme: Theme) -> anyhow::Result<Selection> {
    App::new(controller, theme).run()
}
