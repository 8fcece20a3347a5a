//! "Board" screen: published OKRs, most recent first.

use crossterm::event::{KeyCode, KeyModifiers};
use okrcopilot_shared::PublishedOkr;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use tracing::warn;

use crate::services::Services;

pub(crate) struct BoardScreen {
    entries: Vec<PublishedOkr>,
    selected: usize,
    status: String,
}

impl BoardScreen {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            status: "Press 'r' to refresh the board.".to_string(),
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // List
                Constraint::Length(8), // Detail
                Constraint::Length(1), // Status
            ])
            .split(area);

        if self.entries.is_empty() {
            let empty = Paragraph::new(
                "Nothing published yet.\n\nApprove a draft on the Compose tab to see it here.",
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Published OKRs "));
            f.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, okr)| {
                    let style = if i == self.selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let prefix = if i == self.selected { "▸ " } else { "  " };
                    ListItem::new(format!(
                        "{prefix}{}  [{}]  {}",
                        okr.timestamp.format("%Y-%m-%d %H:%M"),
                        okr.theme,
                        okr.objective
                    ))
                    .style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Published OKRs ({}) ", self.entries.len())),
            );
            f.render_widget(list, chunks[0]);
        }

        if let Some(okr) = self.entries.get(self.selected) {
            let mut lines = vec![Line::from(format!("Confidence: {}", okr.confidence))];
            lines.extend(okr.key_results.iter().map(|kr| Line::from(format!("  • {kr}"))));
            let detail = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" #{} ", okr.id)),
                );
            f.render_widget(detail, chunks[1]);
        }

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[2]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers, services: &Services) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => self.refresh(services),
            _ => {}
        }
    }

    /// Reload the list from the store.
    pub(crate) fn refresh(&mut self, services: &Services) {
        match services.published() {
            Ok(entries) => {
                self.entries = entries;
                self.selected = 0;
                self.status = format!("{} published OKR(s).", self.entries.len());
            }
            Err(e) => {
                warn!(error = %e, "failed to load published OKRs");
                self.status = format!("Could not load the board: {e}");
            }
        }
    }
}
