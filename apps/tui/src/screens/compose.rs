//! "Compose" screen: goal text in, draft out, then baseline answers,
//! edits, and approval.

use crossterm::event::{KeyCode, KeyModifiers};
use okrcopilot_shared::{OkrDraft, PublishedOkr, Result};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::{info, warn};

use crate::services::Services;
use crate::widgets::text_field;

/// What the input box is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Goal,
    Review,
    Baseline,
    Edit,
}

pub(crate) struct ComposeScreen {
    stage: Stage,
    input: String,
    editing: bool,
    draft: Option<OkrDraft>,
    status: String,
}

const GOAL_PROMPT: &str = "Describe a goal in your own words. Enter to type, Enter again to process.";

impl ComposeScreen {
    pub(crate) fn new() -> Self {
        Self {
            stage: Stage::Goal,
            input: String::new(),
            editing: false,
            draft: None,
            status: GOAL_PROMPT.to_string(),
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(1),    // Draft
                Constraint::Length(1), // Hint
                Constraint::Length(3), // Status
            ])
            .split(area);

        let title = match self.stage {
            Stage::Goal | Stage::Review => "Goal",
            Stage::Baseline => "Baseline value",
            Stage::Edit => "Edit instruction",
        };
        let focused = self.stage != Stage::Review;
        f.render_widget(text_field(title, &self.input, focused, self.editing), chunks[0]);

        let draft_block = Block::default().borders(Borders::ALL).title(" Draft ");
        let body = match &self.draft {
            Some(draft) => Paragraph::new(draft_lines(draft)),
            None => Paragraph::new("No draft yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
        };
        f.render_widget(body.block(draft_block).wrap(Wrap { trim: false }), chunks[1]);

        let hint = match (self.stage, self.editing) {
            (Stage::Review, _) => "b baseline · e edit · a approve · r reset",
            (_, true) => "Type · Enter to submit · Esc to cancel",
            (_, false) => "Enter to type",
        };
        let hint_p = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint_p, chunks[2]);

        let status = Paragraph::new(self.status.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(status, chunks[3]);
    }

    /// Returns the published OKR when the key press approved the draft.
    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        services: &Services,
    ) -> Option<PublishedOkr> {
        if self.editing {
            match code {
                KeyCode::Esc => self.cancel_input(),
                KeyCode::Enter => self.submit(services),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            }
            return None;
        }

        match (self.stage, code) {
            (Stage::Goal, KeyCode::Enter) => self.editing = true,
            (Stage::Review, KeyCode::Char('b')) => self.open_baseline(),
            (Stage::Review, KeyCode::Char('e')) => {
                self.stage = Stage::Edit;
                self.editing = true;
                self.status =
                    "Try \"make it more specific\", \"different theme\" or \"shorter\".".to_string();
            }
            (Stage::Review, KeyCode::Char('a')) => return self.approve(services),
            (Stage::Review, KeyCode::Char('r')) => self.reset(),
            _ => {}
        }
        None
    }

    fn submit(&mut self, services: &Services) {
        let result: Result<OkrDraft> = match (self.stage, self.draft.clone()) {
            (Stage::Goal, _) => services.pipeline.run(&self.input),
            (Stage::Baseline, Some(draft)) => match draft.next_gap().map(|gap| gap.index) {
                Some(index) => services.pipeline.resolve_baseline(draft, index, &self.input),
                None => Ok(draft),
            },
            (Stage::Edit, Some(draft)) => services.pipeline.apply_edit(draft, &self.input),
            _ => return,
        };

        match result {
            Ok(draft) => {
                self.input.clear();
                self.draft = Some(draft);
                self.after_update();
            }
            Err(e) => {
                warn!(error = %e, "compose step rejected");
                self.status = e.to_string();
            }
        }
    }

    /// Surface the next baseline question, or settle into review.
    fn after_update(&mut self) {
        if self.draft.as_ref().is_some_and(OkrDraft::has_pending_baselines) {
            self.open_baseline();
            return;
        }
        self.stage = Stage::Review;
        self.editing = false;
        self.status = "Draft ready. a to approve, e to edit.".to_string();
    }

    fn open_baseline(&mut self) {
        let Some(gap) = self.draft.as_ref().and_then(OkrDraft::next_gap) else {
            self.status = "No baseline questions pending.".to_string();
            return;
        };
        self.status = gap.question.clone();
        self.stage = Stage::Baseline;
        self.editing = true;
    }

    fn cancel_input(&mut self) {
        self.input.clear();
        self.editing = false;
        match self.stage {
            Stage::Goal | Stage::Review => {}
            Stage::Baseline => {
                self.stage = Stage::Review;
                self.status = "Baseline skipped. b to answer it before approving.".to_string();
            }
            Stage::Edit => {
                self.stage = Stage::Review;
                self.status = "Edit cancelled.".to_string();
            }
        }
    }

    fn approve(&mut self, services: &Services) -> Option<PublishedOkr> {
        let draft = self.draft.clone()?;
        if draft.has_pending_baselines() {
            self.status = "Answer the baseline question first (b).".to_string();
            return None;
        }

        match services.approve(draft) {
            Ok(okr) => {
                info!(id = %okr.id, "draft approved");
                self.reset();
                self.status = format!("Published #{}. It is on the Board tab.", okr.id);
                Some(okr)
            }
            Err(e) => {
                warn!(error = %e, "approve failed");
                self.status = e.to_string();
                None
            }
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

fn draft_lines(draft: &OkrDraft) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Theme       ", label),
            Span::raw(draft.theme.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Objective   ", label),
            Span::raw(draft.objective.clone()),
        ]),
        Line::from(vec![
            Span::styled("Confidence  ", label),
            Span::raw(draft.confidence.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Key results", label)),
    ];

    for (i, kr) in draft.key_results.iter().enumerate() {
        let pending = draft.needs_baselines.iter().any(|gap| gap.index == i);
        let style = if pending {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {}. {kr}", i + 1), style)));
    }

    lines
}
