//! Reusable TUI widgets.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        )
}

/// Single-line text input. Yellow while typing, cyan when focused.
pub(crate) fn text_field<'a>(title: &'a str, value: &'a str, focused: bool, editing: bool) -> Paragraph<'a> {
    let style = if focused && editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let shown = if editing {
        format!("{value}▏")
    } else {
        value.to_string()
    };

    Paragraph::new(shown).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} "))
            .border_style(style),
    )
}
