//! Login and signup screens

use super::{centered_rect, draw_footer, draw_header, draw_input};
use crate::app::{App, Screen};
use ratatui::prelude::*;
use shared::models::SHOP_TYPES;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    match app.screen {
        Screen::Signup => {
            draw_header(f, chunks[0], "Sign up", "");
            draw_signup_form(f, app, chunks[1]);
            draw_footer(
                f,
                chunks[2],
                " Tab next field | Enter submit | Esc back to login",
            );
        }
        _ => {
            draw_header(f, chunks[0], "Login", "");
            draw_login_form(f, app, chunks[1]);
            draw_footer(
                f,
                chunks[2],
                " Tab next field | Enter login | Ctrl+S sign up | Esc quit",
            );
        }
    }
}

fn masked(value: &str) -> String {
    "*".repeat(value.chars().count())
}

fn draw_login_form(f: &mut Frame, app: &App, area: Rect) {
    let form = centered_rect(50, 60, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(form);

    draw_input(
        f,
        rows[0],
        "Phone number",
        app.phone_input.value(),
        &app.phone_input,
        app.focus == 0,
    );
    let password = masked(app.password_input.value());
    draw_input(
        f,
        rows[1],
        "Password",
        &password,
        &app.password_input,
        app.focus == 1,
    );
}

fn draw_signup_form(f: &mut Frame, app: &App, area: Rect) {
    let form = centered_rect(50, 90, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(form);

    draw_input(
        f,
        rows[0],
        "Phone number",
        app.phone_input.value(),
        &app.phone_input,
        app.focus == 0,
    );
    let password = masked(app.password_input.value());
    draw_input(
        f,
        rows[1],
        "Password",
        &password,
        &app.password_input,
        app.focus == 1,
    );
    let confirm = masked(app.confirm_input.value());
    draw_input(
        f,
        rows[2],
        "Confirm password",
        &confirm,
        &app.confirm_input,
        app.focus == 2,
    );
    draw_input(
        f,
        rows[3],
        "Shop name",
        app.shop_name_input.value(),
        &app.shop_name_input,
        app.focus == 3,
    );

    // shop type picker, arrows cycle when focused
    let style = if app.focus == 4 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let picker = ratatui::widgets::Paragraph::new(Line::from(vec![
        Span::raw("< "),
        Span::styled(SHOP_TYPES[app.shop_type_index], style),
        Span::raw(" >"),
    ]))
    .block(
        ratatui::widgets::Block::default()
            .borders(ratatui::widgets::Borders::ALL)
            .title(" Shop type "),
    );
    f.render_widget(picker, rows[4]);
}
