//! View functions for the sign-in gate.
//!
//! Pure rendering: reads flow state, draws to the frame, mutates nothing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{
    ChangePasswordForm, ForgotPasswordForm, LockReason, LockedState, LoginField, LoginFlow,
    LoginForm, PasswordField, ResetPasswordForm,
};
use crate::common::{FieldLine, InputHint, PanelConfig, render_field_line, render_panel};
use crate::render::{SPINNER_FRAMES, school_title};
use crate::state::AppState;

const PANEL_WIDTH: u16 = 58;

/// Renders the active gate screen.
pub fn render_gate(flow: &LoginFlow, app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match flow {
        LoginFlow::Login(form) => render_login(form, app, frame, area),
        LoginFlow::FirstTimePasswordChange(form) => render_first_time(form, app, frame, area),
        LoginFlow::TokenPasswordReset(form) => render_token_reset(form, app, frame, area),
        LoginFlow::ForgotPassword(form) => render_forgot(form, app, frame, area),
        LoginFlow::AccountLocked(locked) => render_locked(locked, frame, area),
    }
}

fn render_login(form: &LoginForm, app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = [
        InputHint::new("Enter", "sign in"),
        InputHint::new("Tab", "next field"),
        InputHint::new("Ctrl+F", "forgot password"),
        InputHint::new("Esc", "quit"),
    ];
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: "Sign in",
            border_color: Color::Cyan,
            width: PANEL_WIDTH,
            height: 11,
            hints: &hints,
        },
    );

    render_school_header(frame, body, app);

    render_field_line(
        frame,
        row(body, 2),
        &FieldLine {
            label: "Email",
            value: &form.email,
            masked: false,
            focused: form.focus == LoginField::Email,
        },
    );
    render_field_line(
        frame,
        row(body, 3),
        &FieldLine {
            label: "Password",
            value: &form.password,
            masked: true,
            focused: form.focus == LoginField::Password,
        },
    );

    render_status(
        frame,
        rows(body, 5, 2),
        form.error.as_deref(),
        form.notice.as_deref(),
        form.submitting,
        "Signing in...",
        app.spinner_frame,
    );
}

fn render_first_time(form: &ChangePasswordForm, app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = [
        InputHint::new("Enter", "save password"),
        InputHint::new("Tab", "next field"),
        InputHint::new("Esc", "back"),
    ];
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: "Choose a new password",
            border_color: Color::Yellow,
            width: PANEL_WIDTH,
            height: 12,
            hints: &hints,
        },
    );

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "This is your first sign-in.",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "Replace the temporary password before continuing.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(intro, rows(body, 0, 2));

    render_password_fields(frame, body, 3, &form.new_password, &form.confirm_password, form.focus);
    render_status(
        frame,
        rows(body, 6, 2),
        form.error.as_deref(),
        None,
        form.submitting,
        "Saving password...",
        app.spinner_frame,
    );
}

fn render_token_reset(form: &ResetPasswordForm, app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = [
        InputHint::new("Enter", "reset password"),
        InputHint::new("Tab", "next field"),
        InputHint::new("Esc", "back to sign-in"),
    ];
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: "Reset password",
            border_color: Color::Yellow,
            width: PANEL_WIDTH,
            height: 12,
            hints: &hints,
        },
    );

    let intro = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Resetting the password for ", Style::default().fg(Color::White)),
            Span::styled(
                form.email.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "The emailed link is good for one attempt.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(intro, rows(body, 0, 2));

    render_password_fields(frame, body, 3, &form.new_password, &form.confirm_password, form.focus);
    render_status(
        frame,
        rows(body, 6, 2),
        form.error.as_deref(),
        None,
        form.submitting,
        "Resetting password...",
        app.spinner_frame,
    );
}

fn render_forgot(form: &ForgotPasswordForm, app: &AppState, frame: &mut Frame, area: Rect) {
    let hints = [
        InputHint::new("Enter", "send reset link"),
        InputHint::new("Esc", "back to sign-in"),
    ];
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: "Forgot password",
            border_color: Color::Cyan,
            width: PANEL_WIDTH,
            height: 10,
            hints: &hints,
        },
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "We will email a password reset link.",
            Style::default().fg(Color::White),
        ))),
        row(body, 0),
    );
    render_field_line(
        frame,
        row(body, 2),
        &FieldLine {
            label: "Email",
            value: &form.email,
            masked: false,
            focused: true,
        },
    );
    render_status(
        frame,
        rows(body, 4, 2),
        form.error.as_deref(),
        form.notice.as_deref(),
        form.submitting,
        "Sending link...",
        app.spinner_frame,
    );
}

fn render_locked(locked: &LockedState, frame: &mut Frame, area: Rect) {
    let mut hints = vec![InputHint::new("Enter", "back to sign-in")];
    if locked.can_request_unlock() {
        hints.push(InputHint::new("u", "request unlock"));
    }
    let body = render_panel(
        frame,
        area,
        &PanelConfig {
            title: "Account locked",
            border_color: Color::Red,
            width: PANEL_WIDTH,
            height: 11,
            hints: &hints,
        },
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            locked.message.clone(),
            Style::default().fg(Color::White),
        )))
        .wrap(Wrap { trim: true }),
        rows(body, 0, 2),
    );

    let schedule = match (locked.reason, locked.countdown) {
        (LockReason::Temporary, Some(seconds)) => Line::from(Span::styled(
            format!("Unlocks automatically in {seconds}s"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        (LockReason::Permanent, _) => Line::from(Span::styled(
            "This lock does not expire.",
            Style::default().fg(Color::Red),
        )),
        _ => Line::from(Span::styled(
            "Only the school office can remove this lock.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(schedule), row(body, 3));

    if locked.unlock_requested {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Unlock request noted. The school office will take a look.",
                Style::default().fg(Color::Green),
            ))),
            row(body, 5),
        );
    }
}

fn render_school_header(frame: &mut Frame, body: Rect, app: &AppState) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            school_title(app),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))),
        row(body, 0),
    );
}

fn render_password_fields(
    frame: &mut Frame,
    body: Rect,
    first_row: u16,
    new_password: &str,
    confirm_password: &str,
    focus: PasswordField,
) {
    render_field_line(
        frame,
        row(body, first_row),
        &FieldLine {
            label: "New",
            value: new_password,
            masked: true,
            focused: focus == PasswordField::New,
        },
    );
    render_field_line(
        frame,
        row(body, first_row + 1),
        &FieldLine {
            label: "Confirm",
            value: confirm_password,
            masked: true,
            focused: focus == PasswordField::Confirm,
        },
    );
}

/// One status line: error beats notice beats the in-flight spinner.
fn render_status(
    frame: &mut Frame,
    area: Rect,
    error: Option<&str>,
    notice: Option<&str>,
    submitting: bool,
    busy_label: &str,
    spinner_frame: usize,
) {
    let line = if submitting {
        let glyph = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{glyph} {busy_label}"),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = error {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(notice) = notice {
        Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Green),
        ))
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn row(body: Rect, offset: u16) -> Rect {
    rows(body, offset, 1)
}

fn rows(body: Rect, offset: u16, height: u16) -> Rect {
    let offset = offset.min(body.height);
    let height = height.min(body.height.saturating_sub(offset));
    Rect::new(body.x, body.y + offset, body.width, height)
}
