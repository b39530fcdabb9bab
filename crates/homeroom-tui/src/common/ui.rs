//! Panel and field rendering helpers shared by the gate and home screens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::text::truncate_with_ellipsis;

/// Configuration for a centered panel.
pub struct PanelConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
}

/// Renders a centered panel (clears background, draws border and title)
/// and returns the body area inside it. The last inner row is reserved
/// for hints when any are given.
pub fn render_panel(frame: &mut Frame, area: Rect, config: &PanelConfig<'_>) -> Rect {
    let width = config.width.min(area.width.saturating_sub(4));
    let height = config.height.min(area.height.saturating_sub(2));
    let panel = Rect::new(
        (area.width.saturating_sub(width)) / 2,
        (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.border_color))
        .title(format!(" {} ", config.title))
        .title_style(
            Style::default()
                .fg(config.border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, panel);

    let inner = Rect::new(
        panel.x + 2,
        panel.y + 1,
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    )
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints at the bottom of the panel body.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Configuration for a labeled form field line: "> Label  value█".
pub struct FieldLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub masked: bool,
    pub focused: bool,
}

/// Renders one form field. Masked fields show one bullet per character;
/// the block cursor marks the focused field.
pub fn render_field_line(frame: &mut Frame, area: Rect, field: &FieldLine<'_>) {
    let pointer = if field.focused { "> " } else { "  " };
    let label = format!("{:<10}", field.label);

    let display = if field.masked {
        "•".repeat(field.value.chars().count())
    } else {
        field.value.to_string()
    };
    let max_value_width = area
        .width
        .saturating_sub(pointer.len() as u16 + label.len() as u16 + 1) as usize;
    let display = truncate_with_ellipsis(&display, max_value_width);

    let pointer_color = if field.focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let value_color = if field.focused {
        Color::Yellow
    } else {
        Color::White
    };

    let mut spans = vec![
        Span::styled(pointer, Style::default().fg(pointer_color)),
        Span::styled(label, Style::default().fg(Color::White)),
        Span::styled(display, Style::default().fg(value_color)),
    ];
    if field.focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
