//! Pure view/render functions for the console.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::{AppState, Screen};
use crate::{flow, home};

/// Spinner frames for busy indicators.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Title shown across the console; the configured school name when set.
pub fn school_title(app: &AppState) -> String {
    app.school_name
        .clone()
        .unwrap_or_else(|| "Homeroom".to_string())
}

/// Renders the active screen to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    match &app.screen {
        Screen::Booting => render_booting(app, frame),
        Screen::Gate(flow) => flow::render::render_gate(flow, app, frame),
        Screen::Home(home) => home::render(home, app, frame),
    }
}

fn render_booting(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Yellow)),
        Span::styled(
            " Checking stored session...",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let y = area.y + area.height / 2;
    let row = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the title falls back to the app name without a school.
    #[test]
    fn test_school_title_fallback() {
        let app = AppState::new(None);
        assert_eq!(school_title(&app), "Homeroom");

        let named = AppState::new(Some("Brookfield Primary".to_string()));
        assert_eq!(school_title(&named), "Brookfield Primary");
    }
}
