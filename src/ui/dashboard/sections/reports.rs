//! Reports section: Excel exports

use super::super::components::selector::render_selector;
use super::panel;
use crate::controller::Controller;
use crate::events::ActionKey;
use crate::export::ExportTarget;
use crate::registry::SelectorId;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

pub fn render_reports(f: &mut Frame, area: Rect, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    render_selector(
        f,
        chunks[0],
        "EXPORT PAR HÔTEL",
        controller.registry.selector(SelectorId::Export),
        "[ ]",
    );

    let hint = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("[E] ", Style::default().fg(Color::Cyan)),
            Span::raw("Exporter les réponses de l'hôtel sélectionné (Excel)"),
        ]),
        Line::from(vec![
            Span::styled("[G] ", Style::default().fg(Color::Cyan)),
            Span::raw("Rapport global de tous les hôtels (Excel)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Dossier d'export: {}", controller.export_dir().display()),
            hint,
        )),
    ];

    let selected = controller.registry.selected(SelectorId::Export);
    let running = selected
        .map(|id| controller.is_in_flight(ActionKey::Export(ExportTarget::Hotel(id))))
        .unwrap_or(false)
        || controller.is_in_flight(ActionKey::Export(ExportTarget::Global));
    if running {
        lines.push(Line::from(Span::styled(
            "Export en cours...",
            Style::default().fg(Color::LightBlue),
        )));
    }

    if let Some(path) = &controller.views.reports.last_export {
        lines.push(Line::from(vec![
            Span::styled("Dernier export: ", hint),
            Span::styled(
                path.display().to_string(),
                Style::default().fg(Color::LightGreen),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("RAPPORTS"));
    f.render_widget(paragraph, chunks[1]);
}
