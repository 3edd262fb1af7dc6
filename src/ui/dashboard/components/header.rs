//! Dashboard header component
//!
//! Renders the title and the section tabs

use crate::controller::Controller;
use crate::navigation::Section;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};

/// Render the title line and one tab per section.
pub fn render_header(f: &mut Frame, area: Rect, controller: &Controller) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let loading = if controller.visible_section_loading() {
        "  |  ⟳ Chargement..."
    } else {
        ""
    };
    let title = Paragraph::new(format!(
        "HOTELSAT ADMIN v{}  |  {}{}",
        version,
        controller.environment().server_url(),
        loading
    ))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick),
    );
    f.render_widget(title, header_chunks[0]);

    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| Line::from(format!("{} {}", i + 1, section.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(controller.navigation.active_control().0)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(tabs, header_chunks[1]);
}
