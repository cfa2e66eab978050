//! Shared block chrome for widgets and app panels.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Border color for a focused widget.
pub const FOCUS_COLOR: Color = Color::Cyan;
/// Border color for an idle widget.
pub const IDLE_COLOR: Color = Color::DarkGray;

/// A rounded, bordered block whose border is cyan when focused and dark gray
/// otherwise. An empty title draws no title.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    accent_block(title, if focused { FOCUS_COLOR } else { IDLE_COLOR })
}

/// A rounded, bordered block with an explicit border color.
pub fn accent_block(title: &str, color: Color) -> Block<'_> {
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    if title.is_empty() {
        block
    } else {
        block.title(title)
    }
}
