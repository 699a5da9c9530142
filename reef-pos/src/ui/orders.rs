//! Order history, order detail, and add-items screens

use super::{draw_footer, draw_header, draw_input};
use crate::app::{App, InputMode};
use ratatui::{prelude::*, widgets::*};
use shared::money;
use shared::util::format_date_time;

pub fn draw_orders(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, chunks[0], "Order history", "");

    let date_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let editing = app.input_mode == InputMode::Editing;
    draw_input(
        f,
        date_cols[0],
        "Start date (YYYY-MM-DD)",
        app.start_date_input.value(),
        &app.start_date_input,
        editing && app.focus == 0,
    );
    draw_input(
        f,
        date_cols[1],
        "End date (YYYY-MM-DD)",
        app.end_date_input.value(),
        &app.end_date_input,
        editing && app.focus == 1,
    );

    if app.orders.is_empty() {
        // inline not-found state, never a modal
        let message = if app.orders_loaded {
            "No orders found for this range"
        } else {
            "Press 'e' to pick a date range, Enter to fetch"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Orders "));
        f.render_widget(empty, chunks[2]);
    } else {
        let rows: Vec<Row> = app
            .orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let mark = if app.selected_order_ids.contains(&order.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if i == app.orders_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    mark.to_string(),
                    format!("{}", i + 1),
                    format_date_time(&order.created_at),
                    money::format_amount(order.final_total),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Percentage(40),
        ];
        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["", "No.", "Created", "Total"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL).title(format!(
                " Orders ({}) ",
                app.orders.len()
            )));
        f.render_widget(table, chunks[2]);
    }

    let hints = if editing {
        " Tab switch date | Enter fetch | Esc cancel"
    } else {
        " e dates | Space select | a all | d delete | Enter open | Esc back"
    };
    draw_footer(f, chunks[3], hints);
}

pub fn draw_detail(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    let context = app
        .editor
        .order()
        .map(|o| format!("Table {} | #{}", o.table, o.id))
        .unwrap_or_default();
    draw_header(f, chunks[0], "Order detail", &context);

    let Some(order) = app.editor.order() else {
        // inline not-found state
        let message = if app.detail_missing {
            "Order not found"
        } else {
            "No order loaded"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
        draw_footer(f, chunks[3], " Esc back");
        return;
    };

    let rows: Vec<Row> = order
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.detail_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(vec![
                item.dish_name.clone(),
                format!("x{}", item.quantity),
                money::format_amount(item.price),
                money::format_amount(money::to_f64(money::line_total(item))),
            ])
            .style(style)
        })
        .collect();
    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(10),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ];
    let title = if app.editor.is_dirty() {
        " Items (unsaved changes) "
    } else {
        " Items "
    };
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Dish", "Qty", "Price", "Total"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[1]);

    let subtotal = app.editor.subtotal();
    let final_total = app.editor.final_total();
    let created = order
        .created_at
        .as_deref()
        .map(format_date_time)
        .unwrap_or_else(|| "-".to_string());
    let info = vec![
        Line::from(format!("Created:  {}", created)),
        Line::from(format!("Subtotal: {}", money::format_amount(subtotal))),
        Line::from(format!(
            "Tax:      {}",
            money::format_amount(money::change(final_total, subtotal))
        )),
        Line::from(vec![
            Span::styled("Total:    ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                money::format_amount(final_total),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Paid:     {} ({})",
            money::format_amount(order.paid_amount),
            order.payment_type
        )),
        Line::from(format!("Change:   {}", money::format_amount(order.change))),
    ];
    let info_widget =
        Paragraph::new(info).block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(info_widget, chunks[2]);

    draw_footer(
        f,
        chunks[3],
        " +/- quantity | a add items | s save | Esc back",
    );
}

pub fn draw_add_items(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let context = app
        .editor
        .order()
        .map(|o| format!("#{}", o.id))
        .unwrap_or_default();
    draw_header(f, chunks[0], "Add items", &context);

    let dishes = app.flat_dishes();
    let items: Vec<ListItem> = dishes
        .iter()
        .enumerate()
        .map(|(i, dish)| {
            let quantity = app.editor.quantity_of(&dish.dish_name);
            let badge = if quantity > 0 {
                format!(" x{}", quantity)
            } else {
                String::new()
            };
            let style = if i == app.add_items_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", dish.dish_name), style),
                Span::styled(format!("{:<16}", dish.category), style.fg(Color::DarkGray)),
                Span::styled(format!("{:>14}", money::format_amount(dish.price)), style),
                Span::styled(badge, style.fg(Color::Green)),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Menu "));
    f.render_widget(list, chunks[1]);

    draw_footer(f, chunks[2], " +/Enter add | - remove | Esc back to order");
}
