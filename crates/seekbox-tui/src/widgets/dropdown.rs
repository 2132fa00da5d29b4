//! Dropdown widget — the result list under the search input.
//!
//! Rows are the display text of each result. The highlighted row is drawn
//! with the theme's highlight style and the view scrolls so it stays
//! visible.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};
use std::ops::Range;

pub struct Dropdown<'a> {
    items: &'a [String],
    highlight: usize,
    theme: &'a Theme,
}

impl<'a> Dropdown<'a> {
    pub fn new(items: &'a [String], highlight: usize, theme: &'a Theme) -> Self {
        Self {
            items,
            highlight,
            theme,
        }
    }

    /// Rows the dropdown wants, borders included.
    pub fn desired_height(items: usize, max_rows: u16) -> u16 {
        u16::try_from(items).unwrap_or(u16::MAX).min(max_rows) + 2
    }
}

/// Slice of `len` rows that fits `height` and contains `highlight`.
pub(crate) fn visible_window(len: usize, highlight: usize, height: usize) -> Range<usize> {
    if height == 0 || len == 0 {
        return 0..0;
    }
    let highlight = highlight.min(len - 1);
    let start = (highlight + 1).saturating_sub(height);
    start..(start + height).min(len)
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(" {} result{} ", self.items.len(), if self.items.len() == 1 { "" } else { "s" });
        let block = Block::bordered().title(title).border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let window = visible_window(self.items.len(), self.highlight, inner.height as usize);
        let lines: Vec<Line> = self.items[window.clone()]
            .iter()
            .zip(window)
            .map(|(label, index)| {
                let style = if index == self.highlight {
                    self.theme.dropdown_highlight
                } else {
                    self.theme.dropdown_item
                };
                Line::styled(format!(" {label}"), style)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
