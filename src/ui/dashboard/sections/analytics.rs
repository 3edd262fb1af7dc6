//! Analytics section: server-rendered charts saved to disk

use super::super::components::selector::render_selector;
use super::super::utils::format_size;
use super::{panel, render_message, render_state};
use crate::controller::Controller;
use crate::registry::SelectorId;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

pub fn render_analytics(f: &mut Frame, area: Rect, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    render_selector(
        f,
        chunks[0],
        "HÔTEL",
        controller.registry.selector(SelectorId::Analytics),
        "[ ]",
    );

    let Some(saved) = render_state(
        f,
        chunks[1],
        "GRAPHIQUES",
        &controller.views.analytics.state,
        "Sélectionnez un hôtel pour voir les analyses",
    ) else {
        return;
    };

    if saved.charts.is_empty() {
        render_message(
            f,
            chunks[1],
            "GRAPHIQUES",
            "Aucun graphique disponible",
            Color::DarkGray,
        );
        return;
    }

    let mut lines = Vec::new();
    if let Some(name) = &saved.hotel_name {
        lines.push(Line::from(Span::styled(
            name.clone(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    for chart in &saved.charts {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<24}", chart.kind.title()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>9}  ", format_size(chart.size)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(chart.path.display().to_string()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("GRAPHIQUES"));
    f.render_widget(paragraph, chunks[1]);
}
