//! Plugin hub: module tabs over the plugin cards of the active module.

use cexdeck_core::types::{ModuleCode, PluginDescriptor};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

use super::fit;

/// Rows per plugin card: name line, description line
const CARD_HEIGHT: u16 = 2;

pub struct HubView<'a> {
    plugins: &'a [PluginDescriptor],
    module: ModuleCode,
    selected: usize,
    loading: bool,
    connected: bool,
}

impl<'a> HubView<'a> {
    pub fn new(plugins: &'a [PluginDescriptor], module: ModuleCode, selected: usize) -> Self {
        Self {
            plugins,
            module,
            selected,
            loading: false,
            connected: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    fn tabs_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for module in ModuleCode::ALL {
            let style = if module == self.module {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", module.code()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn render_placeholder(area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled("Not connected", styles::accent_bold())),
            Line::default(),
            Line::from(vec![
                Span::styled("Press ", styles::text_muted()),
                Span::styled("c", styles::keybinding()),
                Span::styled(" to connect to a CloudExchange instance.", styles::text_muted()),
            ]),
        ];
        Paragraph::new(lines)
            .centered()
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_card(&self, plugin: &PluginDescriptor, selected: bool, area: Rect, buf: &mut Buffer) {
        let width = area.width as usize;
        let badge = format!("[{}]", plugin.origin.label());
        let name_width = width.saturating_sub(badge.len() + 4);

        let (marker, name_style) = if selected {
            ("▸ ", styles::accent_bold())
        } else {
            ("  ", styles::text_primary())
        };

        let title = Line::from(vec![
            Span::styled(marker, styles::accent()),
            Span::styled(fit::truncate(&plugin.name, name_width), name_style),
            Span::raw(" "),
            Span::styled(badge, styles::origin_badge(plugin.origin)),
        ]);
        buf.set_line(area.x, area.y, &title, area.width);

        if area.height > 1 {
            let description = plugin.description.as_deref().unwrap_or("No description");
            let text = fit::truncate(description, width.saturating_sub(4));
            buf.set_string(area.x + 4, area.y + 1, text, styles::text_muted());
        }
    }
}

impl Widget for HubView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(Span::styled(" Plugin Hub ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width == 0 {
            return;
        }

        if !self.connected {
            Self::render_placeholder(inner, buf);
            return;
        }

        let [tabs_area, _, body] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        buf.set_line(tabs_area.x, tabs_area.y, &self.tabs_line(), tabs_area.width);

        if self.loading {
            buf.set_string(body.x + 1, body.y, "Loading plugins…", styles::text_muted());
            return;
        }

        if self.plugins.is_empty() {
            let hint = format!("No {} plugins available. Press n to add one.", self.module.code());
            buf.set_string(
                body.x + 1,
                body.y,
                fit::truncate(&hint, body.width.saturating_sub(1) as usize),
                styles::text_muted(),
            );
            return;
        }

        let capacity = (body.height / CARD_HEIGHT) as usize;
        let window = fit::visible_window(self.selected, self.plugins.len(), capacity);
        for (row, idx) in window.enumerate() {
            let card = Rect::new(
                body.x,
                body.y + row as u16 * CARD_HEIGHT,
                body.width,
                CARD_HEIGHT,
            );
            self.render_card(&self.plugins[idx], idx == self.selected, card, buf);
        }

        if body.height > 0 {
            let footer = format!("{}/{}", self.selected + 1, self.plugins.len());
            let x = body.x + body.width.saturating_sub(footer.len() as u16 + 1);
            buf.set_string(x, body.y + body.height - 1, footer, styles::text_muted());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_templates, TestTerminal};
    use cexdeck_core::shape_templates;

    fn cls_plugins() -> Vec<PluginDescriptor> {
        shape_templates(&sample_templates()).plugins_for(ModuleCode::Cls).to_vec()
    }

    #[test]
    fn test_disconnected_placeholder() {
        let plugins = cls_plugins();
        let mut term = TestTerminal::new();
        term.render_widget(HubView::new(&plugins, ModuleCode::Cls, 0), term.area());

        assert!(term.buffer_contains("Not connected"));
        assert!(!term.buffer_contains("Crowdstrike"));
    }

    #[test]
    fn test_cards_with_origin_badges() {
        let plugins = cls_plugins();
        let mut term = TestTerminal::new();
        term.render_widget(
            HubView::new(&plugins, ModuleCode::Cls, 0).connected(true),
            term.area(),
        );

        assert!(term.buffer_contains("Netskope CLS [vendor]"));
        assert!(term.buffer_contains("Crowdstrike [third-party]"));
        assert!(term.buffer_contains("Log shipper"));
    }

    #[test]
    fn test_module_tabs_show_all_codes() {
        let mut term = TestTerminal::new();
        term.render_widget(HubView::new(&[], ModuleCode::Edm, 0).connected(true), term.area());

        for code in ["CLS", "CTO", "CTE", "CRE", "EDM", "CFC"] {
            assert!(term.buffer_contains(code), "missing tab {}", code);
        }
        assert!(term.buffer_contains("No EDM plugins available"));
    }

    #[test]
    fn test_selected_card_has_marker() {
        let plugins = cls_plugins();
        let mut term = TestTerminal::new();
        term.render_widget(
            HubView::new(&plugins, ModuleCode::Cls, 1).connected(true),
            term.area(),
        );

        let row = term.find_line(&plugins[1].name).unwrap();
        assert!(term.line_contains(row, "▸"));
        assert!(term.buffer_contains("2/2"));
    }

    #[test]
    fn test_loading_line() {
        let mut term = TestTerminal::new();
        term.render_widget(
            HubView::new(&[], ModuleCode::Cls, 0).connected(true).loading(true),
            term.area(),
        );
        assert!(term.buffer_contains("Loading plugins"));
    }
}
