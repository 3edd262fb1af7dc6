//! Responses section: one page of survey responses with pagination

use super::super::components::selector::render_selector;
use super::super::utils::{format_french_date, rating_color};
use super::{panel, render_message, render_state};
use crate::api::types::{Recommendation, ResponsePage};
use crate::controller::Controller;
use crate::controller::view::{PageLink, ResponsesView, responses_summary};
use crate::registry::SelectorId;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

pub fn render_responses(f: &mut Frame, area: Rect, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    render_selector(
        f,
        chunks[0],
        "HÔTEL",
        controller.registry.selector(SelectorId::Responses),
        "[ ]",
    );

    let Some(page) = render_state(
        f,
        chunks[1],
        "RÉPONSES",
        &controller.views.responses.state,
        "Sélectionnez un hôtel pour voir les réponses",
    ) else {
        return;
    };

    // A page past the last one is empty but still offers the page links
    if page.responses.is_empty() && page.total == 0 {
        render_message(
            f,
            chunks[1],
            "RÉPONSES",
            "Aucune réponse trouvée",
            Color::DarkGray,
        );
        return;
    }

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(2)])
        .split(chunks[1]);

    render_table(f, body[0], page);
    render_pagination(f, body[1], &controller.views.responses);
}

fn recommendation_cell(recommendation: Recommendation) -> Cell<'static> {
    let color = match recommendation {
        Recommendation::Yes => Color::LightGreen,
        Recommendation::No => Color::LightRed,
        Recommendation::Unknown => Color::DarkGray,
    };
    Cell::from(recommendation.to_string()).style(Style::default().fg(color))
}

fn render_table(f: &mut Frame, area: Rect, page: &ResponsePage) {
    let rows: Vec<Row> = page
        .responses
        .iter()
        .map(|response| {
            let rating = match response.overall_rating {
                Some(r) => Cell::from(format!("{:.0}/5", r)).style(Style::default().fg(rating_color(r))),
                None => Cell::from("-"),
            };
            Row::new(vec![
                Cell::from(
                    response
                        .submission_date
                        .as_deref()
                        .map(format_french_date)
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(response.client_name.clone().unwrap_or_else(|| "Anonyme".to_string())),
                Cell::from(response.client_email.clone().unwrap_or_else(|| "-".to_string())),
                rating,
                recommendation_cell(response.recommendation()),
            ])
        })
        .collect();

    let header = Row::new(vec!["Date", "Client", "Email", "Note", "Recommande"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let title = responses_summary(page).unwrap_or_default();
    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Length(6),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(panel(&format!("RÉPONSES - {}", title)));
    f.render_widget(table, area);
}

fn render_pagination(f: &mut Frame, area: Rect, view: &ResponsesView) {
    let links: Vec<PageLink> = view.links();
    if links.is_empty() {
        return;
    }
    let mut spans = vec![Span::styled("Pages: ", Style::default().fg(Color::DarkGray))];
    for link in links {
        let style = if link.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::LightBlue)
        };
        spans.push(Span::styled(format!(" {} ", link.number), style));
        spans.push(Span::raw(" "));
    }
    match &view.jump_input {
        Some(input) => spans.push(Span::styled(
            format!("  Aller à la page: {}_", input),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled("  [←→] [G]", Style::default().fg(Color::DarkGray))),
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
