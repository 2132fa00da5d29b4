//! Ratatui widgets for the seekbox TUI.

pub mod chips;
pub mod dropdown;
pub mod search_input;

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    buf.content.iter().map(|cell| cell.symbol()).collect()
}
