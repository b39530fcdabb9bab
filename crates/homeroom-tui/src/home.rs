//! Home screen shown once a session is established.
//!
//! The gated area of the console. Anything here may assume a signed-in
//! user; routing back out happens only through sign-out.

use crossterm::event::{KeyCode, KeyEvent};
use homeroom_core::auth::User;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{InputHint, PanelConfig, render_panel};
use crate::effects::UiEffect;
use crate::render::school_title;
use crate::state::AppState;

/// State of the home screen.
#[derive(Debug, Clone)]
pub struct HomeState {
    pub user: User,
}

impl HomeState {
    pub fn new(user: User) -> Self {
        Self { user }
    }
}

/// Handles a key press on the home screen.
pub fn handle_key(_home: &mut HomeState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('l') => vec![UiEffect::Logout],
        _ => vec![],
    }
}

/// Renders the home screen.
pub fn render(home: &HomeState, app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let hints = [
        InputHint::new("l", "sign out"),
        InputHint::new("q", "quit"),
    ];
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: &school_title(app),
            border_color: Color::Cyan,
            width: 58,
            height: 10,
            hints: &hints,
        },
    );

    let user = &home.user;
    let lines = vec![
        Line::from(Span::styled(
            "Signed in as",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            user.full_name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(user.role.label(), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  {}", user.email),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    let content = Rect::new(body.x, body.y + 1, body.width, body.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), content);
}
