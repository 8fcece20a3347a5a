//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

mod board;
mod compose;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use okrcopilot_shared::PublishedOkr;
use ratatui::prelude::*;

use crate::services::Services;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Compose,
    Board,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compose => write!(f, "Compose"),
            Self::Board => write!(f, "Board"),
        }
    }
}

/// Per-screen state and behaviour.
pub(crate) enum Screen {
    Compose(compose::ComposeScreen),
    Board(board::BoardScreen),
}

impl Screen {
    pub(crate) fn new(id: ScreenId) -> Self {
        match id {
            ScreenId::Compose => Self::Compose(compose::ComposeScreen::new()),
            ScreenId::Board => Self::Board(board::BoardScreen::new()),
        }
    }

    /// Whether the current screen has an active text input field.
    pub(crate) fn is_editing(&self) -> bool {
        match self {
            Self::Compose(s) => s.is_editing(),
            Self::Board(_) => false,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        match self {
            Self::Compose(s) => s.draw(f, area),
            Self::Board(s) => s.draw(f, area),
        }
    }

    /// Returns the published OKR when the key press approved a draft.
    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        services: &Services,
    ) -> Option<PublishedOkr> {
        match self {
            Self::Compose(s) => s.handle_key(code, modifiers, services),
            Self::Board(s) => {
                s.handle_key(code, modifiers, services);
                None
            }
        }
    }

    /// Reload store-backed content, if this screen shows any.
    pub(crate) fn refresh(&mut self, services: &Services) {
        if let Self::Board(s) = self {
            s.refresh(services);
        }
    }
}
