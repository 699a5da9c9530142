//! Sales flow screens: table grid, menu ordering, receipt, payment

use super::{centered_rect, draw_footer, draw_header, draw_input};
use crate::app::{App, InputMode, TABLE_COLS};
use ratatui::{prelude::*, widgets::*};
use shared::money;

pub fn draw_tables(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, chunks[0], "Tables", "");

    let grid = Block::default().borders(Borders::ALL).title(" Select a table ");
    let inner = grid.inner(chunks[1]);
    f.render_widget(grid, chunks[1]);

    let rows = (app.config.tables as usize).div_ceil(TABLE_COLS);
    if rows > 0 && inner.height > 0 {
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3); rows])
            .split(inner);

        for row in 0..rows {
            let Some(row_area) = row_areas.get(row) else {
                break;
            };
            let col_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, TABLE_COLS as u32); TABLE_COLS])
                .split(*row_area);

            for col in 0..TABLE_COLS {
                let index = row * TABLE_COLS + col;
                if index >= app.config.tables as usize {
                    break;
                }
                let table = index as u32 + 1;
                let units = app.cart.unit_count(table);

                let style = if index == app.table_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else if units > 0 {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let label = if units > 0 {
                    format!("Table {} ({})", table, units)
                } else {
                    format!("Table {}", table)
                };
                let cell = Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(cell, col_areas[col]);
            }
        }
    }

    draw_footer(
        f,
        chunks[2],
        " Arrows move | Enter order | o history | m menu admin | q quit",
    );
}

pub fn draw_menu(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let table = app.cart.selected_table().unwrap_or(0);
    draw_header(f, chunks[0], "Menu", &format!("Table {}", table));

    let titles: Vec<Line> = app
        .menu
        .iter()
        .map(|s| Line::from(s.category_name.as_str()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.category_tab)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Categories "));
    f.render_widget(tabs, chunks[1]);

    let items: Vec<ListItem> = app
        .current_section()
        .map(|section| {
            section
                .items
                .iter()
                .enumerate()
                .map(|(i, dish)| {
                    let quantity = app.cart.quantity_of(table, &dish.dish_name);
                    let badge = if quantity > 0 {
                        format!(" x{}", quantity)
                    } else {
                        String::new()
                    };
                    let style = if i == app.dish_cursor {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<28}", dish.dish_name), style),
                        Span::styled(
                            format!("{:>14}", money::format_amount(dish.price)),
                            style,
                        ),
                        Span::styled(badge, style.fg(Color::Green)),
                    ]))
                })
                .collect()
        })
        .unwrap_or_default();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Dishes "));
    f.render_widget(list, chunks[2]);

    draw_footer(
        f,
        chunks[3],
        " Arrows navigate | +/Enter add | - remove | r receipt | Esc tables",
    );
}

pub fn draw_receipt(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(7),
            Constraint::Length(3),
        ])
        .split(f.area());

    let (table, cart) = match app.cart.selected_cart() {
        Some((table, cart)) => (table, Some(cart)),
        None => (app.cart.selected_table().unwrap_or(0), None),
    };
    draw_header(f, chunks[0], "Receipt", &format!("Table {}", table));

    let rows: Vec<Row> = cart
        .map(|c| {
            c.items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let style = if i == app.receipt_cursor {
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
                .collect()
        })
        .unwrap_or_default();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(10),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ];
    let table_widget = Table::new(rows, widths)
        .header(
            Row::new(vec!["Dish", "Qty", "Price", "Total"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Items "));
    f.render_widget(table_widget, chunks[1]);

    // Totals panel with the editable tax percentage
    let subtotal = cart.map(|c| c.subtotal()).unwrap_or(0.0);
    let rate = app.tax_rate();
    let order_type = cart.map(|c| c.order_type).unwrap_or_default();

    let tax_style = if app.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let totals = vec![
        Line::from(vec![
            Span::raw("Order type: "),
            Span::styled(order_type.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Subtotal:   "),
            Span::raw(money::format_amount(subtotal)),
        ]),
        Line::from(vec![
            Span::raw(format!("Tax ({}%): ", app.tax_input.value())),
            Span::styled(
                money::format_amount(money::tax_amount(subtotal, rate)),
                tax_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Total:      ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                money::format_amount(money::final_total(subtotal, rate)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let totals_widget = Paragraph::new(totals)
        .block(Block::default().borders(Borders::ALL).title(" Totals "));
    f.render_widget(totals_widget, chunks[2]);

    let hints = if app.input_mode == InputMode::Editing {
        " Type tax percent | Enter/Esc done"
    } else {
        " +/- quantity | t order type | e tax | p pay | Esc menu"
    };
    draw_footer(f, chunks[3], hints);
}

pub fn draw_payment(f: &mut Frame, app: &App) {
    draw_receipt(f, app);

    let area = centered_rect(40, 35, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Payment (Cash) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_input(
        f,
        rows[0],
        "Paid amount",
        app.paid_input.value(),
        &app.paid_input,
        true,
    );

    let total = app
        .cart
        .selected_cart()
        .map(|(_, c)| money::final_total(c.subtotal(), app.tax_rate()))
        .unwrap_or(0.0);
    let paid = money::parse_amount(app.paid_input.value()).unwrap_or(0.0);
    let change = money::change(paid, total);
    let change_style = if change < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let detail = Paragraph::new(vec![Line::from(vec![
        Span::raw("Change: "),
        Span::styled(money::format_amount(change), change_style),
    ])]);
    f.render_widget(detail, rows[1]);
}
