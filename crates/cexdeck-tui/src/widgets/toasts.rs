//! Toast stack in the bottom-right corner, newest at the bottom.

use cexdeck_app::notifications::{Notification, NotificationQueue};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::theme::{palette, styles};

use super::fit;
use super::modal_overlay::clear_area;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;
const MAX_VISIBLE: usize = 4;

pub struct Toasts<'a> {
    queue: &'a NotificationQueue,
}

impl<'a> Toasts<'a> {
    pub fn new(queue: &'a NotificationQueue) -> Self {
        Self { queue }
    }

    fn render_toast(notification: &Notification, area: Rect, buf: &mut Buffer) {
        let (icon, accent) = styles::severity_indicator(notification.severity);
        clear_area(buf, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .title(Span::styled(format!(" {} ", notification.severity.label()), accent))
            .style(Style::default().bg(palette::TOAST_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let text = fit::truncate(&notification.message, inner.width.saturating_sub(3) as usize);
        let line = Line::from(vec![
            Span::styled(icon, accent),
            Span::raw(" "),
            Span::styled(text, styles::text_primary()),
        ]);
        buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(1));
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.queue.is_empty() || area.height < TOAST_HEIGHT {
            return;
        }

        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let fit_count = (area.height / TOAST_HEIGHT) as usize;

        // Newest first, stacked upward from the bottom edge
        for (slot, notification) in self.queue.iter().rev().take(MAX_VISIBLE.min(fit_count)).enumerate() {
            let y = area.y + area.height - TOAST_HEIGHT * (slot as u16 + 1);
            Self::render_toast(notification, Rect::new(x, y, width, TOAST_HEIGHT), buf);
        }
    }
}
