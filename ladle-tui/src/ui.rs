use ladle_core::{kitchen::MealLine, model::ComponentGroup};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, Screen, HOME_ENTRIES};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let title = format!(
        "ladle – kitchen counts & delivery sheets · {}",
        app.date.format("%a, %b-%d")
    );
    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL).title("Ladle"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::Home => draw_home(frame, app, *content_area),
        Screen::KitchenCount => draw_kitchen_count(frame, app, *content_area),
        Screen::Labels => draw_labels(frame, app, *content_area),
        Screen::RouteSelect => draw_route_select(frame, app, *content_area),
        Screen::RouteSheet => draw_route_sheet(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Home => "↑/↓ move · Enter/Space open · q/Ctrl-C quit",
        Screen::KitchenCount | Screen::Labels => "Esc/←/b back · q/Ctrl-C quit",
        Screen::RouteSelect => "↑/↓ move · Enter open sheet · Esc/← back · q/Ctrl-C quit",
        Screen::RouteSheet => "Esc/←/b back to routes · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_home(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = HOME_ENTRIES
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let prefix = if idx == app.home_index { "> " } else { "  " };
            ListItem::new(format!("{prefix}{entry}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Reports (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.home_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_kitchen_count(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(report) = &app.kitchen else {
        let paragraph = Paragraph::new("Loading kitchen count…")
            .block(Block::default().borders(Borders::ALL).title("Kitchen count"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let component_height = u16::try_from(report.component_lines.len()).unwrap_or(u16::MAX);
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(component_height.saturating_add(3)),
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [component_area, meal_area] = chunks else {
        return;
    };

    let component_rows = report.component_lines.iter().map(|line| {
        Row::new(vec![
            Cell::from(group_label(&line.group).to_owned()),
            Cell::from(line.name.clone()),
            Cell::from(line.ingredients.clone()),
            Cell::from(line.regular.to_string()),
            Cell::from(line.large.to_string()),
        ])
    });
    let component_table = Table::new(
        component_rows,
        [
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Min(24),
            Constraint::Length(5),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(vec!["Group", "Component", "Ingredients", "Reg", "Lg"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Components"))
    .column_spacing(1);
    frame.render_widget(component_table, *component_area);

    let meal_rows = report.meal_lines.iter().map(meal_line_row);
    let meal_table = Table::new(
        meal_rows,
        [
            Constraint::Length(16),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Min(12),
            Constraint::Min(12),
        ],
    )
    .header(
        Row::new(vec![
            "Client",
            "Reg",
            "Lg",
            "Clash comps",
            "Clash ingr",
            "Preparation",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Meal specifics"))
    .column_spacing(1);
    frame.render_widget(meal_table, *meal_area);
}

fn meal_line_row(line: &MealLine) -> Row<'static> {
    match line {
        MealLine::Data(row) => Row::new(vec![
            Cell::from(row.client.clone()),
            Cell::from(row.regular.clone()),
            Cell::from(row.large.clone()),
            Cell::from(row.component_clash.clone()),
            Cell::from(row.ingredient_clash.clone()),
            Cell::from(row.preparation.clone()),
        ]),
        MealLine::Subtotal { regular, large } => Row::new(vec![
            Cell::from("SUBTOTAL"),
            Cell::from(regular.to_string()),
            Cell::from(large.to_string()),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
        MealLine::TotalSpecials { regular, large } => Row::new(vec![
            Cell::from("TOTAL SPECIALS"),
            Cell::from(regular.to_string()),
            Cell::from(large.to_string()),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

fn draw_labels(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(sheet) = &app.labels else {
        let paragraph = Paragraph::new("Loading label sheet…")
            .block(Block::default().borders(Borders::ALL).title("Meal labels"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let title = format!(
        "Meal labels – {} label(s) on {} page(s)",
        sheet.label_count(),
        sheet.page_count()
    );

    if sheet.label_count() == 0 {
        let paragraph = Paragraph::new("Nothing to print today.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items = sheet
        .pages
        .iter()
        .flatten()
        .map(|label| {
            let mut text = label.client.clone();
            if label.large {
                text.push_str(" · LARGE");
            }
            if let Some((current, total)) = label.ordinal {
                text.push_str(&format!(" · ({current} of {total})"));
            }
            text.push_str(&format!(" · {}", label.route));
            if !label.instructions.is_empty() {
                text.push_str(&format!(" · {}", label.instructions.join(" ")));
            }
            ListItem::new(text)
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_route_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = if app.routes.is_empty() {
        vec![ListItem::new("No routes configured.")]
    } else {
        app.routes
            .iter()
            .enumerate()
            .map(|(idx, (_id, name))| {
                let prefix = if idx == app.route_index { "> " } else { "  " };
                ListItem::new(format!("{prefix}{name}"))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select route (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.routes.is_empty() {
        state.select(Some(app.route_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_route_sheet(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let route_name = app
        .selected_route
        .as_ref()
        .map_or("<route>", |(_, name)| name.as_str());
    let title = format!("Route sheet – {route_name}");

    let Some(sheet) = &app.sheet else {
        let paragraph = Paragraph::new("Loading route sheet…")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    if sheet.stops.is_empty() {
        let paragraph = Paragraph::new("No deliveries on this route today.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let summary_height = u16::try_from(sheet.summary_lines.len()).unwrap_or(u16::MAX);
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary_height.saturating_add(3)),
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, stops_area] = chunks else {
        return;
    };

    let summary_rows = sheet.summary_lines.iter().map(|line| {
        Row::new(vec![
            Cell::from(group_label(&line.group).to_owned()),
            Cell::from(line.regular.to_string()),
            Cell::from(line.large.to_string()),
        ])
    });
    let summary_table = Table::new(
        summary_rows,
        [
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(5),
        ],
    )
    .header(
        Row::new(vec!["Group", "Reg", "Lg"]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Summary"))
    .column_spacing(1);
    frame.render_widget(summary_table, *summary_area);

    let items = sheet
        .stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            ListItem::new(format!(
                "{:>2}. {}, {} – {}",
                idx + 1,
                stop.lastname,
                stop.firstname,
                stop.street
            ))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, *stops_area);
}

fn group_label(group: &ComponentGroup) -> &str {
    match group {
        ComponentGroup::MainDish => "Main dish",
        ComponentGroup::Sides => "Sides",
        ComponentGroup::GreenSalad => "Green salad",
        ComponentGroup::FruitSalad => "Fruit salad",
        ComponentGroup::Dessert => "Dessert",
        ComponentGroup::Pudding => "Pudding",
        ComponentGroup::Compote => "Compote",
        ComponentGroup::Other(name) => name.as_str(),
    }
}
