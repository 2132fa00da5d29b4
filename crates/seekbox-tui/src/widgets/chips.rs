//! Chip bar — one line listing the records selected in multi mode.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct ChipBar<'a> {
    labels: &'a [String],
    theme: &'a Theme,
}

impl<'a> ChipBar<'a> {
    pub fn new(labels: &'a [String], theme: &'a Theme) -> Self {
        Self { labels, theme }
    }
}

impl Widget for ChipBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if self.labels.is_empty() {
            Line::from(Span::styled(" nothing selected", self.theme.status_hint))
        } else {
            let mut spans = Vec::with_capacity(self.labels.len() * 3 + 1);
            spans.push(Span::raw(" "));
            for label in self.labels {
                spans.push(Span::styled(format!(" {label} "), self.theme.chip));
                spans.push(Span::styled("× ", self.theme.chip_remove));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::buffer_text;

    fn render(labels: &[String]) -> String {
        let theme = Theme::load_default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        ChipBar::new(labels, &theme).render(buf.area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn lists_labels_in_order() {
        let text = render(&["Banana".to_string(), "Apple".to_string()]);
        let banana = text.find("Banana").unwrap();
        let apple = text.find("Apple").unwrap();
        assert!(banana < apple);
    }

    #[test]
    fn empty_selection_shows_hint() {
        assert!(render(&[]).contains("nothing selected"));
    }
}
