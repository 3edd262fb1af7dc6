//! Dashboard section: key figures, category chart and insights

use super::super::components::selector::render_selector;
use super::super::utils::{insight_color, rating_color};
use super::{panel, render_message, render_state};
use crate::controller::Controller;
use crate::controller::view::{CategoryChart, DashboardData};
use crate::registry::SelectorId;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph, Wrap};

/// Bars are drawn in tenths so one decimal survives the integer scale.
const BAR_SCALE: f64 = 10.0;

pub fn render_overview(f: &mut Frame, area: Rect, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    render_selector(
        f,
        chunks[0],
        "HÔTEL",
        controller.registry.selector(SelectorId::Dashboard),
        "[ ]",
    );

    let view = &controller.views.dashboard;
    let Some(data) = render_state(
        f,
        chunks[1],
        "STATISTIQUES",
        &view.state,
        "Sélectionnez un hôtel pour voir les statistiques",
    ) else {
        return;
    };

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(35),
        ])
        .split(chunks[1]);

    render_figures(f, body[0], data);
    match view.chart.chart() {
        Some(chart) if !chart.bars.is_empty() => render_chart(f, body[1], chart),
        _ => render_message(
            f,
            body[1],
            "NOTES PAR CATÉGORIE",
            "Aucune note par catégorie",
            Color::DarkGray,
        ),
    }
    render_insights(f, body[2], data);
}

fn render_figures(f: &mut Frame, area: Rect, data: &DashboardData) {
    let stats = &data.statistics;
    let cards = [
        (
            "Note moyenne",
            format!("{:.1}/5", stats.average_overall_rating),
            rating_color(stats.average_overall_rating),
        ),
        (
            "Recommandation",
            format!("{:.0}%", stats.recommendation_rate),
            Color::LightCyan,
        ),
        (
            "Réponses ce mois",
            stats.monthly_responses.to_string(),
            Color::LightBlue,
        ),
        (
            "Total réponses",
            stats.total_responses.to_string(),
            Color::LightMagenta,
        ),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value, color), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(panel(title));
        f.render_widget(card, *column);
    }
}

fn render_chart(f: &mut Frame, area: Rect, chart: &CategoryChart) {
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value((bar.value * BAR_SCALE).round() as u64)
                .text_value(format!("{:.1}", bar.value))
                .label(Line::from(bar.label.clone()))
                .style(Style::default().fg(rating_color(bar.value)))
        })
        .collect();

    let inner_width = area.width.saturating_sub(4);
    let count = chart.bars.len().max(1) as u16;
    let bar_width = (inner_width / count).saturating_sub(1).clamp(3, 14);

    let widget = BarChart::default()
        .block(panel("NOTES PAR CATÉGORIE"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max((chart.max() * BAR_SCALE) as u64)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));
    f.render_widget(widget, area);
}

fn render_insights(f: &mut Frame, area: Rect, data: &DashboardData) {
    if data.insights.is_empty() {
        render_message(
            f,
            area,
            "INSIGHTS",
            "Aucun insight disponible",
            Color::DarkGray,
        );
        return;
    }

    let lines: Vec<Line> = data
        .insights
        .iter()
        .map(|insight| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", insight.title),
                    Style::default()
                        .fg(insight_color(insight.kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(insight.description.clone()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("INSIGHTS"));
    f.render_widget(paragraph, area);
}
