//! Confirmation dialog widget for delete and disconnect

use cexdeck_app::confirm_dialog::ConfirmDialogState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::{palette, styles};

use super::modal_overlay::{centered_rect, clear_area, render_shadow};

/// Key shown for each option position
const OPTION_KEYS: [(&str, Color); 2] = [("y", palette::STATUS_GREEN), ("n", palette::STATUS_RED)];

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }

    fn buttons(&self) -> Line<'a> {
        let mut spans = Vec::new();
        for ((label, _), (key, color)) in self.state.options.iter().zip(OPTION_KEYS) {
            if !spans.is_empty() {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(
                key,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("] ", styles::text_muted()));
            spans.push(Span::styled(label.as_str(), styles::text_primary()));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(52, 9, area);

        render_shadow(buf, modal_area);
        clear_area(buf, modal_area);

        let block = styles::modal_block(self.state.title.clone()).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [_, message_area, _, buttons_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.state.message.as_str())
            .centered()
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(palette::STATUS_YELLOW))
            .render(message_area, buf);

        Paragraph::new(self.buttons()).centered().render(buttons_area, buf);
    }
}
