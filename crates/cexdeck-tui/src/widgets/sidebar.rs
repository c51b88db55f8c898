//! Section navigation sidebar

use cexdeck_core::types::Section;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

pub struct Sidebar {
    active: Section,
}

impl Sidebar {
    pub fn new(active: Section) -> Self {
        Self { active }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(Span::styled(" Sections ", styles::text_secondary()));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let mut lines: Vec<Line> = Section::ALL
            .iter()
            .map(|section| {
                let text = format!(" {} {}", section.index() + 1, section.label());
                if *section == self.active {
                    Line::from(Span::styled(format!("{:<width$}", text), styles::focused_selected()))
                } else {
                    Line::from(vec![
                        Span::styled(format!(" {}", section.index() + 1), styles::keybinding()),
                        Span::styled(format!(" {}", section.label()), styles::text_primary()),
                    ])
                }
            })
            .collect();

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(" b hide", styles::text_muted())));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::palette;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_lists_every_section() {
        let mut term = TestTerminal::with_size(18, 10);
        term.render_widget(Sidebar::new(Section::Home), term.area());

        for label in ["Hub", "Blueprints", "Tenants", "Keys"] {
            assert!(term.buffer_contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_active_section_is_highlighted() {
        let mut term = TestTerminal::with_size(18, 10);
        term.render_widget(Sidebar::new(Section::Tenants), term.area());

        let row = term.find_line("Tenants").unwrap();
        assert_eq!(term.buffer()[(2, row)].bg, palette::ACCENT);

        let other = term.find_line("Keys").unwrap();
        assert_ne!(term.buffer()[(2, other)].bg, palette::ACCENT);
    }
}
