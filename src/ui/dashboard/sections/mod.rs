//! Section renderers
//!
//! One renderer per section. Each reads the controller and never mutates it.

pub mod analytics;
pub mod automation;
pub mod hotels;
pub mod overview;
pub mod reports;
pub mod responses;

use crate::controller::view::ViewState;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub(super) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

/// Centered message filling `area`.
pub(super) fn render_message(f: &mut Frame, area: Rect, title: &str, text: &str, color: Color) {
    let message = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(panel(title));
    f.render_widget(message, area);
}

/// Draw the placeholder of a non-ready state. Returns the ready value otherwise.
pub(super) fn render_state<'a, T>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    state: &'a ViewState<T>,
    empty_text: &str,
) -> Option<&'a T> {
    match state {
        ViewState::Empty => {
            render_message(f, area, title, empty_text, Color::DarkGray);
            None
        }
        ViewState::Loading => {
            render_message(f, area, title, "Chargement...", Color::LightBlue);
            None
        }
        ViewState::Failed(message) => {
            render_message(f, area, title, message, Color::LightRed);
            None
        }
        ViewState::Ready(value) => Some(value),
    }
}
