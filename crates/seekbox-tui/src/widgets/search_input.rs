//! Search input widget — the bordered text box at the top of the control.
//!
//! Shows the controller's current input text (or a placeholder) and a
//! spinner in the right-hand corner while a debounced filter is pending.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct SearchInput<'a> {
    text: &'a str,
    placeholder: &'a str,
    loading: bool,
    spinner_frame: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchInput<'a> {
    pub fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self {
            text,
            placeholder: "type to search",
            loading: false,
            spinner_frame: 0,
            focused: true,
            theme,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Show the spinner at `frame` (wraps around).
    pub fn loading(mut self, loading: bool, frame: usize) -> Self {
        self.loading = loading;
        self.spinner_frame = frame;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Absolute terminal position of the text cursor (end of input).
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = u16::try_from(self.text.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(" Search ").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(2)])
            .split(inner);

        let line = if self.text.is_empty() {
            Line::from(Span::styled(self.placeholder, self.theme.input_placeholder))
        } else {
            Line::from(Span::styled(self.text, self.theme.input_text))
        };
        Paragraph::new(line).render(chunks[0], buf);

        if self.loading {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            Paragraph::new(Line::from(Span::styled(glyph, self.theme.input_spinner)))
                .render(chunks[1], buf);
        }
    }
}
