//! Row list for the Blueprints, Tenants and Keys sections.

use cexdeck_core::types::{CredentialSet, TemplateRecord, TenantRegistration};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

use super::fit;

/// One list row: a name and a muted detail column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub name: String,
    pub detail: String,
}

impl ListRow {
    pub fn template(record: &TemplateRecord) -> Self {
        let detail = match &record.description {
            Some(description) => format!("{} · {}", record.module.code(), description),
            None => record.module.code().to_string(),
        };
        Self {
            name: record.name.clone(),
            detail,
        }
    }

    pub fn tenant(tenant: &TenantRegistration) -> Self {
        Self {
            name: format!("{} ({})", tenant.name, tenant.id),
            detail: tenant.url.clone(),
        }
    }

    /// Keys of the payload only; values may be secrets.
    pub fn credential(set: &CredentialSet) -> Self {
        let detail = match &set.credentials {
            Value::Object(map) if !map.is_empty() => {
                map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
            }
            Value::Object(_) => "empty".to_string(),
            other => type_name(other).to_string(),
        };
        Self {
            name: set.name.clone(),
            detail,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct SectionList<'a> {
    title: &'a str,
    rows: Vec<ListRow>,
    selected: usize,
    loading: bool,
    empty_hint: &'a str,
}

impl<'a> SectionList<'a> {
    pub fn new(title: &'a str, rows: Vec<ListRow>, selected: usize) -> Self {
        Self {
            title,
            rows,
            selected,
            loading: false,
            empty_hint: "Nothing here yet.",
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }
}

impl Widget for SectionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ({}) ", self.title, self.rows.len());
        let block = styles::glass_block(true).title(Span::styled(title, styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 4 {
            return;
        }

        let line_width = inner.width as usize;
        if self.loading {
            buf.set_string(inner.x + 1, inner.y, "Loading…", styles::text_muted());
            return;
        }
        if self.rows.is_empty() {
            let hint = fit::truncate(self.empty_hint, line_width.saturating_sub(1));
            buf.set_string(inner.x + 1, inner.y, hint, styles::text_muted());
            return;
        }

        // Name column sized to the longest name, capped at half the width
        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.width())
            .max()
            .unwrap_or(0)
            .min(line_width / 2);
        let detail_width = line_width.saturating_sub(name_width + 5);

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let name = fit::truncate(&row.name, name_width);
                let pad = name_width.saturating_sub(name.width());
                ListItem::new(Line::from(vec![
                    Span::styled(name, styles::text_primary()),
                    Span::raw(" ".repeat(pad + 2)),
                    Span::styled(fit::truncate(&row.detail, detail_width), styles::text_muted()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(styles::focused_selected())
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, inner, buf, &mut state);
    }
}
