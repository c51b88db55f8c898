//! Top bar: connection status on the left, key hints on the right.

use cexdeck_app::session::Session;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

use super::fit;

const HINTS: [(&str, &str); 4] = [("c", "connect"), ("D", "disconnect"), ("r", "refresh"), ("q", "quit")];

pub struct TopBar<'a> {
    session: &'a Session,
}

impl<'a> TopBar<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn status_spans(&self) -> Vec<Span<'a>> {
        let (icon, label, style) = styles::session_indicator(self.session.phase());
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled("cexdeck", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
        ];

        match self.session.target_address.as_deref() {
            Some(address) => {
                spans.push(Span::styled(address, styles::text_primary()));
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("({})", label), style));
            }
            None => spans.push(Span::styled(label, style)),
        }

        if let Some(at) = self.session.connected_at.filter(|_| self.session.connected) {
            spans.push(Span::styled(
                format!("  since {}", at.format("%H:%M:%S")),
                styles::text_muted(),
            ));
        }
        spans
    }

    fn hint_spans() -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (key, action) in HINTS {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        spans
    }
}

impl Widget for TopBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = Line::from(self.status_spans());
        let left_width = left.width() as u16;
        buf.set_line(inner.x, inner.y, &left, inner.width);

        // Hints only when they fit next to the status
        let hints = Line::from(Self::hint_spans());
        let hints_width = hints.width() as u16;
        if left_width + hints_width + 2 <= inner.width {
            let x = inner.x + inner.width - hints_width;
            buf.set_line(x, inner.y, &hints, hints_width);
        } else if left_width > inner.width {
            // Truncate the address when even the status overflows
            let text = fit::truncate(&left.to_string(), inner.width as usize);
            buf.set_string(inner.x, inner.y, text, styles::text_secondary());
        }
    }
}
