//! Modal dialogs: connect, create, raw-payload edit and configure.
//!
//! Single-line inputs render as `Label  value` rows. A multi-line editor, when
//! present, takes the remaining height.

use cexdeck_app::form::{Form, FormField, TextArea, TextField};
use cexdeck_app::modals::{ConfigureModal, Modal};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

use super::fit;
use super::modal_overlay::{centered_rect_percent, prepare_modal};

const MIN_MODAL_WIDTH: u16 = 56;
const MIN_MODAL_HEIGHT: u16 = 12;

pub struct ModalView<'a> {
    modal: &'a Modal,
    connecting: bool,
    session_error: Option<&'a str>,
}

impl<'a> ModalView<'a> {
    pub fn new(modal: &'a Modal) -> Self {
        Self {
            modal,
            connecting: false,
            session_error: None,
        }
    }

    /// Connect attempts live on the session, not the modal.
    pub fn connecting(mut self, connecting: bool) -> Self {
        self.connecting = connecting;
        self
    }

    /// Last failed connect attempt, shown on the connect modal.
    pub fn session_error(mut self, error: Option<&'a str>) -> Self {
        self.session_error = error;
        self
    }

    fn error(&self) -> Option<&'a str> {
        match self.modal {
            Modal::Connect(_) if !self.connecting => self.session_error,
            Modal::Connect(_) => None,
            modal => modal.error(),
        }
    }

    fn busy(&self) -> bool {
        self.modal.is_submitting() || (self.connecting && matches!(self.modal, Modal::Connect(_)))
    }

    fn footer(&self) -> Line<'static> {
        if self.busy() {
            return Line::from(Span::styled(
                "Submitting…",
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let submit = if self.modal.enter_inserts_newline() {
            "Ctrl+S"
        } else {
            "Enter"
        };
        let mut hints: Vec<(&str, &str)> = Vec::new();
        if self.modal.form().is_some() {
            hints.push(("Tab", "next"));
            hints.push(("Space", "toggle"));
        }
        hints.push((submit, "submit"));
        hints.push(("Esc", "cancel"));

        let mut spans = Vec::new();
        for (key, action) in hints {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for ModalView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_rect = match self.modal {
            Modal::Edit(_) => centered_rect_percent(85, 85, MIN_MODAL_WIDTH, MIN_MODAL_HEIGHT, area),
            _ => centered_rect_percent(70, 75, MIN_MODAL_WIDTH, MIN_MODAL_HEIGHT, area),
        };
        prepare_modal(buf, area, modal_rect);

        let block = styles::modal_block(self.modal.title());
        let inner = block.inner(modal_rect);
        block.render(modal_rect, buf);

        if inner.height < 3 || inner.width < 4 {
            return;
        }

        let error_rows = u16::from(self.error().is_some());
        let [body, error_area, footer_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(error_rows),
            Constraint::Length(1),
        ])
        .areas(inner);
        let body = Rect {
            x: body.x + 1,
            width: body.width.saturating_sub(2),
            ..body
        };

        match self.modal {
            Modal::Connect(m) => render_form(&m.form, body, buf, ""),
            Modal::Create(m) => render_form(&m.form, body, buf, ""),
            Modal::Configure(m) => render_configure(m, body, buf),
            Modal::Edit(m) => render_text_area(&m.editor, body, buf, true),
        }

        if let Some(error) = self.error() {
            let text = fit::truncate(&format!("✗ {}", error), error_area.width.saturating_sub(1) as usize);
            buf.set_string(error_area.x + 1, error_area.y, text, styles::status_red());
        }

        buf.set_line(footer_area.x + 1, footer_area.y, &self.footer(), footer_area.width.saturating_sub(1));
    }
}

fn render_configure(modal: &ConfigureModal, area: Rect, buf: &mut Buffer) {
    let plugin = &modal.plugin;
    let header = Line::from(vec![
        Span::styled(plugin.name.clone(), styles::accent_bold()),
        Span::styled(format!(" ({}) ", plugin.module.code()), styles::text_secondary()),
        Span::styled(format!("[{}]", plugin.origin.label()), styles::origin_badge(plugin.origin)),
    ]);
    buf.set_line(area.x, area.y, &header, area.width);

    let note = if modal.needs_tenant() {
        "Vendor plugins are deployed against a registered tenant."
    } else {
        "Third-party plugin: the configuration is pushed as is."
    };
    if area.height > 1 {
        buf.set_string(
            area.x,
            area.y + 1,
            fit::truncate(note, area.width as usize),
            styles::text_muted(),
        );
    }

    let placeholder = if modal.tenants_loading {
        "Loading tenants…"
    } else {
        "No tenants registered"
    };
    let form_area = Rect {
        y: area.y + 3,
        height: area.height.saturating_sub(3),
        ..area
    };
    render_form(&modal.form, form_area, buf, placeholder);
}

/// Draw every field of `form`. `empty_choice` is shown for a choice field with
/// no options.
fn render_form(form: &Form, area: Rect, buf: &mut Buffer, empty_choice: &str) {
    let label_width = form
        .fields
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0) as u16
        + 3;
    let bottom = area.y + area.height;
    let mut y = area.y;

    for (idx, field) in form.fields.iter().enumerate() {
        if y >= bottom {
            break;
        }
        let focused = idx == form.focus;
        let label_style = if focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        let marker = if focused { "▸ " } else { "  " };
        let required = matches!(field, FormField::Text(f) if f.required);
        let label = Line::from(vec![
            Span::styled(marker, styles::accent()),
            Span::styled(field.label(), label_style),
            Span::styled(if required { "*" } else { "" }, styles::status_red()),
        ]);
        buf.set_line(area.x, y, &label, label_width);

        if let FormField::Area(text_area) = field {
            // Editor goes below its label and takes the rest of the form
            let editor = Rect::new(area.x + 2, y + 1, area.width.saturating_sub(2), bottom.saturating_sub(y + 1));
            render_text_area(text_area, editor, buf, focused);
            y = bottom;
            continue;
        }

        let value_area = Rect::new(
            area.x + label_width,
            y,
            area.width.saturating_sub(label_width),
            1,
        );
        render_inline_value(field, value_area, buf, focused, empty_choice);
        y += 2;
    }
}

fn input_style(focused: bool) -> Style {
    let bg = if focused {
        palette::INPUT_ACTIVE_BG
    } else {
        palette::INPUT_INACTIVE_BG
    };
    Style::default().fg(palette::TEXT_PRIMARY).bg(bg)
}

fn render_inline_value(field: &FormField, area: Rect, buf: &mut Buffer, focused: bool, empty_choice: &str) {
    if area.width == 0 {
        return;
    }
    let width = area.width as usize;
    match field {
        FormField::Text(text) => render_text_input(text, area, buf, focused),
        FormField::Toggle { value, .. } => {
            let text = if *value { "[x] on" } else { "[ ] off" };
            buf.set_string(area.x, area.y, text, if focused { styles::accent() } else { styles::text_primary() });
        }
        FormField::Module { value, .. } => {
            buf.set_string(area.x, area.y, format!("◀ {} ▶", value.code()), input_style(focused));
        }
        FormField::Choice(choice) => {
            let (text, style) = match choice.selected_label() {
                Some(label) => (format!("◀ {} ▶", label), input_style(focused)),
                None if choice.options.is_empty() => (empty_choice.to_string(), styles::text_muted()),
                None => ("◀ choose ▶".to_string(), styles::text_muted()),
            };
            buf.set_string(area.x, area.y, fit::truncate(&text, width), style);
        }
        FormField::Area(_) => {}
    }
}

fn render_text_input(field: &TextField, area: Rect, buf: &mut Buffer, focused: bool) {
    let style = input_style(focused);
    buf.set_style(area, style);

    let value = field.display_value();
    // One column kept free for the cursor
    let visible = fit::tail(&value, (area.width as usize).saturating_sub(1));
    buf.set_string(area.x, area.y, visible, style);

    if focused {
        let x = area.x + visible.width() as u16;
        if let Some(cell) = buf.cell_mut((x, area.y)) {
            cell.set_style(style.add_modifier(Modifier::REVERSED));
        }
    }
}

fn render_text_area(editor: &TextArea, area: Rect, buf: &mut Buffer, focused: bool) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let style = input_style(focused);
    buf.set_style(area, style);

    let (row, col) = editor.cursor();
    let height = area.height as usize;
    let width = area.width as usize;
    let first_row = row.saturating_sub(height - 1);
    let first_col = col.saturating_sub(width - 1);

    for (offset, line) in editor.lines().iter().skip(first_row).take(height).enumerate() {
        let shown: String = line.chars().skip(first_col).collect();
        buf.set_string(
            area.x,
            area.y + offset as u16,
            fit::truncate(&shown, width),
            style,
        );
    }

    if focused {
        let line = editor.lines().get(row).map(String::as_str).unwrap_or_default();
        let shown: String = line.chars().skip(first_col).collect();
        let x = area.x + fit::columns(&shown, col - first_col) as u16;
        let y = area.y + (row - first_row) as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_style(style.add_modifier(Modifier::REVERSED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use cexdeck_app::data::Collection;
    use cexdeck_app::input_key::InputKey;
    use cexdeck_app::modals::{ConnectModal, CreateModal, EditModal, EditTarget};
    use cexdeck_core::types::{ModuleCode, PluginDescriptor, PluginOrigin, TenantRegistration};
    use serde_json::json;

    fn render(view: ModalView) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(view, term.area());
        term
    }

    fn plugin(name: &str) -> PluginDescriptor {
        PluginDescriptor {
            id: "CLS-0".into(),
            name: name.into(),
            module: ModuleCode::Cls,
            origin: PluginOrigin::from_plugin_name(name),
            description: None,
            icon: None,
            color: None,
            config_template: json!({"port": 514}),
        }
    }

    fn tenant() -> TenantRegistration {
        TenantRegistration {
            id: "prod".into(),
            name: "Production".into(),
            url: "https://prod.example.com".into(),
            api_key: "tok".into(),
            description: None,
        }
    }

    #[test]
    fn test_connect_modal_masks_password() {
        let mut connect = ConnectModal::new("10.0.0.5", true);
        connect.form.focus_next();
        for c in "hunter2".chars() {
            connect.form.handle_key(InputKey::Char(c));
        }
        let modal = Modal::Connect(connect);
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("Connect to CloudExchange"));
        assert!(term.buffer_contains("10.0.0.5"));
        assert!(term.buffer_contains("•••••••"));
        assert!(!term.buffer_contains("hunter2"));
        assert!(term.buffer_contains("[x] on"));
    }

    #[test]
    fn test_connecting_shows_progress() {
        let modal = Modal::Connect(ConnectModal::new("10.0.0.5", false));
        let term = render(ModalView::new(&modal).connecting(true));
        assert!(term.buffer_contains("Submitting"));
        assert!(term.buffer_contains("[ ] off"));
    }

    #[test]
    fn test_connect_shows_last_session_error() {
        let modal = Modal::Connect(ConnectModal::new("10.0.0.5", true));
        let term = render(ModalView::new(&modal).session_error(Some("Invalid credentials")));
        assert!(term.buffer_contains("✗ Invalid credentials"));

        let term = render(
            ModalView::new(&modal)
                .connecting(true)
                .session_error(Some("Invalid credentials")),
        );
        assert!(!term.buffer_contains("Invalid credentials"));
    }

    #[test]
    fn test_create_tenant_form_lists_fields() {
        let modal = Modal::Create(CreateModal::new(Collection::Tenants, ModuleCode::Cls));
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("New tenant"));
        for label in ["Tenant key*", "Name*", "URL*", "API token*", "Description"] {
            assert!(term.buffer_contains(label), "missing {}", label);
        }
        assert!(term.buffer_contains("Enter submit"));
    }

    #[test]
    fn test_create_template_shows_module_and_editor() {
        let mut create = CreateModal::new(Collection::Templates, ModuleCode::Cte);
        for _ in 0..4 {
            create.form.focus_next();
        }
        let modal = Modal::Create(create);
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("◀ CTE ▶"));
        assert!(term.buffer_contains("Template (JSON)"));
        assert!(term.buffer_contains("{}"));
        // focused editor takes Enter, so submitting moves to Ctrl+S
        assert!(term.buffer_contains("Ctrl+S submit"));
    }

    #[test]
    fn test_edit_modal_shows_payload_and_error() {
        let mut edit = EditModal::new(EditTarget::Tenant(tenant()));
        edit.error = Some("Tenant payload needs string fields name, url and token".into());
        let modal = Modal::Edit(edit);
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("Edit tenant 'prod'"));
        assert!(term.buffer_contains("\"url\": \"https://prod.example.com\""));
        assert!(term.buffer_contains("✗ Tenant payload needs"));
        assert!(term.buffer_contains("Ctrl+S submit"));
    }

    #[test]
    fn test_configure_vendor_waits_for_tenants() {
        let modal = Modal::Configure(ConfigureModal::new(plugin("Netskope CLS")));
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("Configure Netskope CLS"));
        assert!(term.buffer_contains("[vendor]"));
        assert!(term.buffer_contains("Loading tenants"));
    }

    #[test]
    fn test_configure_tenant_choice_after_load() {
        let mut configure = ConfigureModal::new(plugin("Netskope CLS"));
        configure.set_tenants(&[tenant()]);
        configure.form.focus_next();
        configure.form.handle_key(InputKey::Char(' '));
        let modal = Modal::Configure(configure);
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("◀ Production ▶"));
    }

    #[test]
    fn test_configure_third_party_has_no_tenant_field() {
        let modal = Modal::Configure(ConfigureModal::new(plugin("Crowdstrike")));
        let term = render(ModalView::new(&modal));

        assert!(term.buffer_contains("[third-party]"));
        assert!(!term.buffer_contains("Tenant"));
    }

    #[test]
    fn test_text_area_scrolls_to_cursor() {
        let mut editor = TextArea::new("Payload");
        for i in 0..30 {
            if i > 0 {
                editor.insert_newline();
            }
            for c in format!("line {}", i).chars() {
                editor.insert_char(c);
            }
        }

        let mut term = TestTerminal::with_size(30, 5);
        term.draw_with(|frame| {
            render_text_area(&editor, frame.area(), frame.buffer_mut(), true);
        });

        assert!(term.buffer_contains("line 29"));
        assert!(!term.buffer_contains("line 0"));
        assert_eq!(editor.cursor(), (29, 7));
    }
}
