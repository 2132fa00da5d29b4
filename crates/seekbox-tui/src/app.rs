//! Application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All search behaviour lives
//! in the [`SearchController`]; the app only owns what is purely visual (the
//! dropdown highlight, the spinner frame and the success summary).
//!
//! The loop never blocks past the controller's next debounce deadline: the
//! crossterm poll timeout is capped by it and [`SearchController::tick`] runs
//! on every iteration.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{chips::ChipBar, dropdown::Dropdown, search_input::SearchInput},
};
use crossterm::{
    event::{self as ct_event, DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use seekbox_core::{FocusEvent, SearchController, Selection};
use std::{io, time::Duration};
use tokio::time::Instant;

/// Redraw cadence while a filter is pending (spinner animation).
const FRAME: Duration = Duration::from_millis(80);
/// Poll timeout when nothing is scheduled.
const IDLE: Duration = Duration::from_millis(250);
/// Most rows the dropdown takes before it scrolls.
const DROPDOWN_ROWS: u16 = 8;

const HINT: &str = " Enter select  Esc close  Ctrl+w remove  Ctrl+x clear  Ctrl+c quit";

pub struct App {
    controller: SearchController,
    theme: Theme,
    /// Index into the current results.
    highlight: usize,
    spinner_frame: usize,
    /// Success line shown after a single-mode selection.
    summary: Option<String>,
    /// Input placeholder naming the searched fields.
    placeholder: String,
    quit: bool,
}

impl App {
    pub fn new(controller: SearchController, theme: Theme) -> Self {
        let keys: Vec<String> = controller.config().filter_keys().iter().map(ToString::to_string).collect();
        let placeholder = format!("search {}", keys.join(", "));
        Self {
            controller,
            placeholder,
            theme,
            highlight: 0,
            spinner_frame: 0,
            summary: None,
            quit: false,
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Set up the terminal, run the event loop, restore the terminal, and
    /// return whatever was selected when the user quit.
    pub fn run(mut self) -> anyhow::Result<Selection> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableFocusChange)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        self.controller.detach();
        result.map(|()| self.controller.session().selection().clone())
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        loop {
            {
                let app = &*self;
                terminal.draw(|frame| draw(frame, app))?;
            }

            if self.quit {
                break;
            }

            if ct_event::poll(self.poll_timeout(Instant::now()))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    tracing::debug!(event = ?ev, "app event");
                    self.handle(ev);
                }
            }

            if self.controller.tick(Instant::now()) {
                self.highlight = 0;
            }
            if self.controller.session().is_loading() {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
        }
        Ok(())
    }

    /// How long the loop may wait for input without missing a deadline.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(FRAME),
            None => IDLE,
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Char(c) => {
                let mut text = self.controller.session().input().to_string();
                text.push(c);
                self.type_text(text);
            }
            AppEvent::Backspace => {
                let mut text = self.controller.session().input().to_string();
                if text.pop().is_some() {
                    self.type_text(text);
                }
            }

            AppEvent::Up => {
                if self.controller.session().is_open() {
                    self.highlight = self.highlight.saturating_sub(1);
                }
            }
            AppEvent::Down => {
                let session = self.controller.session();
                if session.is_open() {
                    let last = session.results().len().saturating_sub(1);
                    self.highlight = (self.highlight + 1).min(last);
                }
            }
            AppEvent::Enter => self.select_highlighted(),
            AppEvent::Escape => self.controller.close_dropdown(),

            AppEvent::Focus(cause) => self.controller.on_focus(FocusEvent { cause }),
            AppEvent::Blur => self.controller.on_click_outside(),

            AppEvent::RemoveLastChip => {
                let last = self.controller.session().selection().records().last().cloned();
                if let (Some(record), true) = (last, self.controller.config().multi_select()) {
                    self.controller.remove(&record);
                }
            }
            AppEvent::ClearAll => {
                self.controller.on_clear_all();
                self.summary = None;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
        }
    }

    fn type_text(&mut self, text: String) {
        self.summary = None;
        self.highlight = 0;
        self.controller.on_text_input(text);
    }

    fn select_highlighted(&mut self) {
        let session = self.controller.session();
        if !session.is_open() || session.results().is_empty() {
            return;
        }
        if !self.controller.on_item_click(self.highlight) {
            return;
        }

        let session = self.controller.session();
        self.highlight = self.highlight.min(session.results().len().saturating_sub(1));
        if let Selection::Single(Some(record)) = session.selection() {
            let label = self.controller.display_text(record);
            tracing::debug!(%label, "selection succeeded");
            self.summary = Some(format!("✔ Selected {label}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let session = app.controller.session();

    // Vertical: 3-line input | 1-line chips or summary | body | 1-line hints
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let input = SearchInput::new(session.input(), &app.theme)
        .placeholder(&app.placeholder)
        .loading(session.is_loading(), app.spinner_frame);
    let cursor = input.cursor_position(vert[0]);
    frame.render_widget(input, vert[0]);

    if app.controller.config().multi_select() {
        let labels: Vec<String> = session
            .selection()
            .records()
            .iter()
            .map(|r| app.controller.display_text(r))
            .collect();
        frame.render_widget(ChipBar::new(&labels, &app.theme), vert[1]);
    } else if let Some(summary) = &app.summary {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {summary}"), app.theme.status_success))),
            vert[1],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HINT, app.theme.status_hint))),
        vert[3],
    );

    // Dropdown overlays everything below the input
    if session.is_open() {
        let labels: Vec<String> = session.results().iter().map(|r| app.controller.display_text(r)).collect();
        let below = area.height.saturating_sub(vert[0].bottom());
        let height = Dropdown::desired_height(labels.len(), DROPDOWN_ROWS).min(below);
        let dropdown_area = Rect {
            y: vert[0].bottom(),
            height,
            ..vert[0]
        };
        frame.render_widget(Dropdown::new(&labels, app.highlight, &app.theme), dropdown_area);
    }

    frame.set_cursor_position(cursor);
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
