//! Draw functions, one per screen group
//!
//! Thin views over the `App` state; no mutation happens here.

mod admin;
mod auth;
mod orders;
mod sales;

use crate::app::{Alert, AlertKind, App, Screen};
use ratatui::{prelude::*, widgets::*};

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login | Screen::Signup => auth::draw(f, app),
        Screen::Tables => sales::draw_tables(f, app),
        Screen::Menu => sales::draw_menu(f, app),
        Screen::Receipt => sales::draw_receipt(f, app),
        Screen::Payment => sales::draw_payment(f, app),
        Screen::Orders => orders::draw_orders(f, app),
        Screen::OrderDetail => orders::draw_detail(f, app),
        Screen::AddItems => orders::draw_add_items(f, app),
        Screen::MenuAdmin => admin::draw(f, app),
    }

    if app.is_loading {
        draw_loading(f);
    }
    if let Some(alert) = &app.alert {
        draw_alert(f, alert);
    }
}

/// Centered rect for modal overlays
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Screen header bar
pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str, context: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Reef POS | {} ", title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(context, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Key hints footer
pub(crate) fn draw_footer(f: &mut Frame, area: Rect, hints: &str) {
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

/// One bordered input field, highlighted when focused
pub(crate) fn draw_input(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    input: &tui_input::Input,
    focused: bool,
) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let widget = Paragraph::new(value)
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
    f.render_widget(widget, area);

    if focused {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn draw_loading(f: &mut Frame) {
    let area = f.area();
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let widget = Paragraph::new(" Working... ")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(widget, line);
}

fn draw_alert(f: &mut Frame, alert: &Alert) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let (border, hint) = match alert.kind {
        AlertKind::Error => (Color::Red, "press any key"),
        AlertKind::Info => (Color::Green, "press any key"),
        AlertKind::Confirm(_) => (Color::Yellow, "Enter/y confirm  Esc/n cancel"),
    };

    let text = vec![
        Line::from(""),
        Line::from(alert.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", alert.title)),
        );
    f.render_widget(widget, area);
}
