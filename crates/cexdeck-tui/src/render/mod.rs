//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use cexdeck_app::data::Collection;
use cexdeck_app::state::{AppState, UiMode};
use cexdeck_core::types::Section;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;
use crate::widgets::{ListRow, SectionList};

/// Render the complete UI (View in TEA)
///
/// Pure: reads `state` and draws, nothing else.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.show_sidebar);

    frame.render_widget(widgets::TopBar::new(&state.session), areas.top_bar);
    if let Some(sidebar) = areas.sidebar {
        frame.render_widget(widgets::Sidebar::new(state.section), sidebar);
    }
    render_section(frame, state, areas.main);

    // Overlays
    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::Modal => render_modal(frame, state, area),
        UiMode::ConfirmDialog => {
            // A delete confirmation may sit on top of an open modal
            render_modal(frame, state, area);
            if let Some(ref dialog_state) = state.confirm_dialog_state {
                frame.render_widget(widgets::ConfirmDialog::new(dialog_state), area);
            }
        }
    }

    // Toasts go last, above any modal
    frame.render_widget(widgets::Toasts::new(&state.notifications), area);
}

fn render_modal(frame: &mut Frame, state: &AppState, area: Rect) {
    if let Some(ref modal) = state.modal {
        let view = widgets::ModalView::new(modal)
            .connecting(state.session.connecting)
            .session_error(state.session.last_error.as_deref());
        frame.render_widget(view, area);
    }
}

fn render_section(frame: &mut Frame, state: &AppState, area: Rect) {
    let loading = state.data.guard(Collection::for_section(state.section)).loading;
    let selected = state.selected_index();

    match state.section {
        Section::Home => {
            let hub = widgets::HubView::new(
                state.data.templates.plugins_for(state.module),
                state.module,
                selected,
            )
            .connected(state.session.connected)
            .loading(loading);
            frame.render_widget(hub, area);
        }
        Section::Templates => {
            let rows = state.data.templates.templates.iter().map(ListRow::template).collect();
            let list = SectionList::new(Section::Templates.label(), rows, selected)
                .loading(loading)
                .empty_hint("No configuration templates. Press n to create one.");
            frame.render_widget(list, area);
        }
        Section::Tenants => {
            let rows = state.data.tenants.iter().map(ListRow::tenant).collect();
            let list = SectionList::new(Section::Tenants.label(), rows, selected)
                .loading(loading)
                .empty_hint("No tenants registered. Press n to add one.");
            frame.render_widget(list, area);
        }
        Section::Credentials => {
            let rows = state.data.credentials.iter().map(ListRow::credential).collect();
            let list = SectionList::new(Section::Credentials.label(), rows, selected)
                .loading(loading)
                .empty_hint("No credential sets stored. Press n to add one.");
            frame.render_widget(list, area);
        }
    }
}
