//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::screens::{Screen, ScreenId};
use crate::services::Services;
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub screens: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Per-screen state.
    pub screen_states: Vec<Screen>,
}

impl App {
    pub(crate) fn new() -> Self {
        let screens = vec![ScreenId::Compose, ScreenId::Board];
        let screen_states = screens.iter().map(|s| Screen::new(*s)).collect();

        Self {
            active_tab: 0,
            screens,
            should_quit: false,
            status: "Ready. Press ? for help".to_string(),
            show_help: false,
            screen_states,
        }
    }

    fn current_screen(&self) -> &Screen {
        &self.screen_states[self.active_tab]
    }

    fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.screen_states[self.active_tab]
    }

    fn select_tab(&mut self, idx: usize, services: &Services) {
        self.active_tab = idx;
        self.status = format!("{}", self.screens[idx]);
        self.current_screen_mut().refresh(services);
    }

    fn refresh_all(&mut self, services: &Services) {
        for screen in &mut self.screen_states {
            screen.refresh(services);
        }
    }
}

/// Entry point: sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(services: Services) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &services);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, services: &Services) -> Result<()> {
    let mut app = App::new();
    app.refresh_all(services);

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers, services);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers, services: &Services) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.current_screen().is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.current_screen().is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='9') if !app.current_screen().is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.screens.len() {
                app.select_tab(idx, services);
            }
            return;
        }
        KeyCode::Tab if !app.current_screen().is_editing() => {
            let idx = (app.active_tab + 1) % app.screens.len();
            app.select_tab(idx, services);
            return;
        }
        KeyCode::BackTab if !app.current_screen().is_editing() => {
            let idx = if app.active_tab == 0 {
                app.screens.len() - 1
            } else {
                app.active_tab - 1
            };
            app.select_tab(idx, services);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    if let Some(okr) = app.current_screen_mut().handle_key(code, modifiers, services) {
        app.status = format!("Published #{}", okr.id);
        app.refresh_all(services);
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app
        .screens
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {s}", i + 1)))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" OKR Copilot "),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area, delegated to the screen
    app.current_screen().draw(f, chunks[1]);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(64, 80, f.area());

    let help = Paragraph::new(help_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help: press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Overlay text: the compose-to-publish walk-through, then per-tab keys.
fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from("From a rough goal to a published OKR").style(heading),
        Line::from("  1. Compose: Enter, type the goal, Enter to draft it"),
        Line::from("  2. Yellow key results still need a current value;"),
        Line::from("     type it when the question appears (Esc skips)"),
        Line::from("  3. Refine with e, e.g. \"more specific\" or \"shorter\""),
        Line::from("  4. Approve with a; the OKR lands on the Board"),
        Line::from(""),
        Line::from("Compose (while reviewing a draft)").style(heading),
        Line::from("  b   answer the next baseline question"),
        Line::from("  e   edit with an instruction"),
        Line::from("  a   approve (blocked until baselines are in)"),
        Line::from("  r   discard the draft and start over"),
        Line::from(""),
        Line::from("Board").style(heading),
        Line::from("  ↑/↓ j/k   pick an OKR to see its key results"),
        Line::from("  r         reload from the store"),
        Line::from(""),
        Line::from("Anywhere").style(heading),
        Line::from("  1/2, Tab/S-Tab   switch tab"),
        Line::from("  ?                toggle this help"),
        Line::from("  q / Ctrl-C       quit (q only outside text input)"),
    ]
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use okrcopilot_core::{FixedCount, OkrPipeline};

    use super::*;

    fn services() -> Services {
        Services::in_memory(OkrPipeline::new(Arc::new(FixedCount(4))), 50)
    }

    fn press(app: &mut App, services: &Services, code: KeyCode) {
        handle_key(app, code, KeyModifiers::NONE, services);
    }

    #[test]
    fn help_walks_through_compose_and_board() {
        let text: String = help_lines()
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        assert!(text.contains("baseline question"));
        assert!(text.contains("Approve with a"));
        assert!(text.contains("Board"));
        assert!(!text.contains("Navigate lists"));
    }

    #[test]
    fn help_key_toggles_overlay() {
        let services = services();
        let mut app = App::new();

        press(&mut app, &services, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, &services, KeyCode::Char('x'));
        assert!(!app.show_help);
    }

    #[test]
    fn number_keys_switch_tabs() {
        let services = services();
        let mut app = App::new();

        press(&mut app, &services, KeyCode::Char('2'));
        assert_eq!(app.active_tab, 1);
        press(&mut app, &services, KeyCode::Char('9'));
        assert_eq!(app.active_tab, 1);
        press(&mut app, &services, KeyCode::Tab);
        assert_eq!(app.active_tab, 0);
    }

    #[test]
    fn typing_q_does_not_quit_while_editing() {
        let services = services();
        let mut app = App::new();

        press(&mut app, &services, KeyCode::Enter);
        press(&mut app, &services, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, &services, KeyCode::Esc);
        press(&mut app, &services, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let services = services();
        let mut app = App::new();
        press(&mut app, &services, KeyCode::Enter);
        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &services);
        assert!(app.should_quit);
    }

    #[test]
    fn approval_refreshes_board() {
        let services = services();
        let mut app = App::new();

        press(&mut app, &services, KeyCode::Enter);
        for c in "Boost team engagement".chars() {
            press(&mut app, &services, KeyCode::Char(c));
        }
        press(&mut app, &services, KeyCode::Enter);
        press(&mut app, &services, KeyCode::Char('a'));

        assert!(app.status.starts_with("Published #"));
        assert_eq!(services.published().expect("list").len(), 1);
    }
}
