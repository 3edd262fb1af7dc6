//! Modal dialogs: hotel creation form and delete confirmation

use crate::controller::Modal;
use crate::forms::{HotelField, HotelForm};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// A rectangle of at most `width` x `height`, centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_modal(f: &mut Frame, area: Rect, modal: &Modal) {
    match modal {
        Modal::AddHotel(form) => render_hotel_form(f, area, form),
        Modal::ConfirmDelete { name, .. } => render_confirm_delete(f, area, name),
    }
}

fn render_hotel_form(f: &mut Frame, area: Rect, form: &HotelForm) {
    let dialog = centered(area, 64, 13);
    f.render_widget(Clear, dialog);

    let block = Block::default()
        .title("Ajouter un hôtel")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::LightYellow))
        .padding(Padding::horizontal(1));
    let inner = block.inner(dialog);
    f.render_widget(block, dialog);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(inner);

    for (i, field) in [HotelField::Name, HotelField::Location, HotelField::TallyUrl]
        .into_iter()
        .enumerate()
    {
        let focused = form.focus() == field;
        let border = if focused {
            Style::default().fg(Color::LightYellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut text = form.field(field).value().to_string();
        if focused {
            text.push('▏');
        }
        let input = Paragraph::new(text).block(
            Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
        f.render_widget(input, rows[i]);
    }
}

fn render_confirm_delete(f: &mut Frame, area: Rect, name: &str) {
    let dialog = centered(area, 60, 8);
    f.render_widget(Clear, dialog);

    let lines = vec![
        Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(
            "Êtes-vous sûr de vouloir supprimer cet hôtel ? Toutes les données associées seront perdues.",
        ),
        Line::from(""),
        Line::from(Span::styled(
            "[O] Supprimer   [N] Annuler",
            Style::default().fg(Color::Cyan),
        )),
    ];

    let confirm = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Confirmation")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::LightRed)),
        );
    f.render_widget(confirm, dialog);
}
