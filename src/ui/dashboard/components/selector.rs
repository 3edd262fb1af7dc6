//! Hotel selector component

use crate::registry::Selector;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render a selector as `◀ choice ▶`, with the key that cycles it.
pub fn render_selector(f: &mut Frame, area: Rect, title: &str, selector: &Selector, keys: &str) {
    let (label, label_style) = match selector.selected() {
        Some(_) => (
            selector.selected_label(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            selector.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Cyan)),
        Span::styled(label.to_string(), label_style),
        Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("   {} hôtel(s)  {}", selector.options().len(), keys),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(line).block(block), area);
}
