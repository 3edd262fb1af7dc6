//! Automation section: Tally form binding, webhook test and status

use super::super::components::selector::render_selector;
use super::{panel, render_state};
use crate::controller::Controller;
use crate::registry::SelectorId;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table};

pub fn render_automation(f: &mut Frame, area: Rect, controller: &Controller) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(columns[0]);

    render_selector(
        f,
        left[0],
        "HÔTEL À AUTOMATISER",
        controller.registry.selector(SelectorId::Automation),
        "[ ]",
    );

    let view = &controller.views.automation;
    let mut url = view.form.tally_url.value().to_string();
    if view.editing {
        url.push('▏');
    }
    let border = if view.editing {
        Color::LightYellow
    } else {
        Color::DarkGray
    };
    let input = Paragraph::new(url).block(
        Block::default()
            .title("URL du formulaire Tally [E]")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, left[1]);

    render_selector(
        f,
        left[2],
        "TEST D'INTÉGRATION",
        controller.registry.selector(SelectorId::WebhookTest),
        "{ } [T]",
    );

    let mut lines = Vec::new();
    if let Some(test) = &view.last_test {
        lines.push(Line::from(Span::styled(
            "Dernier test réussi",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(id) = test.response_id {
            lines.push(Line::from(format!("Réponse de test #{}", id)));
        }
        if !test.message.is_empty() {
            lines.push(Line::from(Span::styled(
                test.message.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    f.render_widget(Paragraph::new(lines).block(panel("RÉSULTAT")), left[3]);

    let Some(status) = render_state(
        f,
        columns[1],
        "STATUT DES WEBHOOKS",
        &view.status,
        "Statut non chargé",
    ) else {
        return;
    };

    let rows: Vec<Row> = status
        .hotels_data
        .iter()
        .map(|h| Row::new(vec![h.hotel_name.clone(), h.response_count.to_string()]))
        .collect();
    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(10)])
        .header(
            Row::new(vec!["Hôtel", "Réponses"]).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(panel(&format!(
            "STATUT - {} hôtels, {} réponses",
            status.total_hotels, status.total_responses
        )));
    f.render_widget(table, columns[1]);
}
