//! Menu management screen: categories and dishes

use super::{centered_rect, draw_footer, draw_header, draw_input};
use crate::app::{AdminForm, AdminPane, App};
use ratatui::{prelude::*, widgets::*};
use shared::money;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, chunks[0], "Menu management", "");

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    draw_categories(f, app, panes[0]);
    draw_dishes(f, app, panes[1]);

    let hints = if app.admin_form == AdminForm::None {
        " Tab pane | n new | e edit dish | d delete | Esc back"
    } else {
        " Tab next field | Enter submit | Esc cancel"
    };
    draw_footer(f, chunks[2], hints);

    if app.admin_form != AdminForm::None {
        draw_form(f, app);
    }
}

fn pane_border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_categories(f: &mut Frame, app: &App, area: Rect) {
    let active = app.admin_pane == AdminPane::Categories;
    let rows = app.category_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, (_, name))| {
            let style = if active && i == app.admin_category_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(name.clone(), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(active))
            .title(format!(" Categories ({}) ", rows.len())),
    );
    f.render_widget(list, area);
}

fn draw_dishes(f: &mut Frame, app: &App, area: Rect) {
    let active = app.admin_pane == AdminPane::Dishes;
    let dishes = app.flat_dishes();
    let items: Vec<ListItem> = dishes
        .iter()
        .enumerate()
        .map(|(i, dish)| {
            let style = if active && i == app.admin_dish_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", dish.dish_name), style),
                Span::styled(format!("{:<16}", dish.category), style.fg(Color::DarkGray)),
                Span::styled(format!("{:>14}", money::format_amount(dish.price)), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(active))
            .title(format!(" Dishes ({}) ", dishes.len())),
    );
    f.render_widget(list, area);
}

fn draw_form(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 45, f.area());
    f.render_widget(Clear, area);

    let title = match app.admin_form {
        AdminForm::AddCategory => " New category ",
        AdminForm::AddDish => " New dish ",
        AdminForm::EditDish { .. } => " Edit dish ",
        AdminForm::None => return,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    match &app.admin_form {
        AdminForm::AddCategory => {
            draw_input(
                f,
                rows[0],
                "Category name",
                app.name_input.value(),
                &app.name_input,
                app.focus == 0,
            );
        }
        AdminForm::AddDish => {
            draw_input(
                f,
                rows[0],
                "Category",
                app.category_input.value(),
                &app.category_input,
                app.focus == 0,
            );
            draw_input(
                f,
                rows[1],
                "Dish name",
                app.name_input.value(),
                &app.name_input,
                app.focus == 1,
            );
            draw_input(
                f,
                rows[2],
                "Price",
                app.price_input.value(),
                &app.price_input,
                app.focus == 2,
            );
        }
        AdminForm::EditDish { .. } => {
            draw_input(
                f,
                rows[0],
                "Dish name",
                app.name_input.value(),
                &app.name_input,
                app.focus == 0,
            );
            draw_input(
                f,
                rows[1],
                "Price",
                app.price_input.value(),
                &app.price_input,
                app.focus == 1,
            );
        }
        AdminForm::None => {}
    }
}
