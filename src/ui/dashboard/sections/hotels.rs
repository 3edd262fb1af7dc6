//! Hotels section: the table of every hotel

use super::{panel, render_message};
use crate::controller::Controller;

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table, TableState};

pub fn render_hotels(f: &mut Frame, area: Rect, controller: &Controller) {
    let view = &controller.views.hotels;
    if view.rows.is_empty() {
        render_message(f, area, "HÔTELS", "Aucun hôtel trouvé", Color::DarkGray);
        return;
    }

    let placeholder = |text: &str| -> Style {
        if text == "Non configuré" || text == "Non créé" || text == "-" {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::LightBlue)
        }
    };

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.location.clone()).style(placeholder(&row.location)),
                Cell::from(row.form.clone()).style(placeholder(&row.form)),
                Cell::from(row.sheet.clone()).style(placeholder(&row.sheet)),
            ])
        })
        .collect();

    let header = Row::new(vec!["Nom", "Localisation", "Formulaire Tally", "Google Sheet"])
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(18),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(panel(&format!("HÔTELS ({})", view.rows.len())))
    .row_highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightYellow),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(view.selected));
    f.render_stateful_widget(table, area, &mut state);
}
