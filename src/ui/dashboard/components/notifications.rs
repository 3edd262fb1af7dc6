//! Notification toasts
//!
//! Stacked in the top-right corner, newest at the top.

use super::super::utils::severity_color;
use crate::consts::cli_consts::MAX_VISIBLE_NOTIFICATIONS;
use crate::notifications::NotificationCenter;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

pub fn render_notifications(f: &mut Frame, area: Rect, center: &NotificationCenter) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);
    let mut y = area.y;

    for notification in center
        .active()
        .iter()
        .rev()
        .take(MAX_VISIBLE_NOTIFICATIONS)
    {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = severity_color(notification.severity);

        let toast = Paragraph::new(notification.message.as_str())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(notification.severity.to_string().to_uppercase())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, toast_area);
        f.render_widget(toast, toast_area);
        y += TOAST_HEIGHT;
    }
}
