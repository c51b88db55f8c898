//! Full-frame rendering tests

use super::view;
use crate::test_utils::{
    create_connected_state, create_test_state, sample_templates, sample_tenants, TestTerminal,
};
use cexdeck_app::confirm_dialog::ConfirmDialogState;
use cexdeck_app::data::{Collection, Mutation};
use cexdeck_app::modals::{CreateModal, Modal};
use cexdeck_app::state::{AppState, UiMode};
use cexdeck_core::types::{ModuleCode, Section};

fn draw(term: &mut TestTerminal, state: &AppState) {
    term.draw_with(|frame| view(frame, state));
}

#[test]
fn test_initial_screen() {
    let state = create_test_state();
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.line_contains(1, "Disconnected"));
    assert!(term.buffer_contains("Sections"));
    assert!(term.buffer_contains("Plugin Hub"));
    assert!(term.buffer_contains("Not connected"));
}

#[test]
fn test_collapsed_sidebar() {
    let mut state = create_test_state();
    state.show_sidebar = false;
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(!term.buffer_contains("Sections"));
    assert!(term.buffer_contains("Plugin Hub"));
}

#[test]
fn test_connected_hub_lists_module_plugins() {
    let mut state = create_connected_state();
    state.data.apply_templates(Ok(sample_templates())).unwrap();
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.buffer_contains("10.0.0.5"));
    assert!(term.buffer_contains("Netskope CLS"));
    assert!(!term.buffer_contains("Syslog"));

    state.module = ModuleCode::Cte;
    draw(&mut term, &state);
    assert!(term.buffer_contains("Syslog"));
    assert!(!term.buffer_contains("Netskope CLS"));
}

#[test]
fn test_templates_section_lists_all_modules() {
    let mut state = create_test_state();
    state.section = Section::Templates;
    state.data.apply_templates(Ok(sample_templates())).unwrap();
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.buffer_contains("Blueprints (3)"));
    assert!(term.buffer_contains("Syslog"));
    assert!(term.buffer_contains("Crowdstrike"));
}

#[test]
fn test_tenants_section_loading_then_loaded() {
    let mut state = create_test_state();
    state.section = Section::Tenants;
    assert!(state.data.begin_fetch(Collection::Tenants));
    let mut term = TestTerminal::new();
    draw(&mut term, &state);
    assert!(term.buffer_contains("Loading"));

    state.data.apply_tenants(Ok(sample_tenants())).unwrap();
    draw(&mut term, &state);
    assert!(!term.buffer_contains("Loading"));
    assert!(term.buffer_contains("Production (prod)"));
}

#[test]
fn test_empty_credentials_hint() {
    let mut state = create_test_state();
    state.section = Section::Credentials;
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.buffer_contains("Keys (0)"));
    assert!(term.buffer_contains("No credential sets stored"));
}

#[test]
fn test_modal_overlay() {
    let mut state = create_test_state();
    state.open_modal(Modal::Create(CreateModal::new(Collection::Credentials, ModuleCode::Cls)));
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert_eq!(state.ui_mode, UiMode::Modal);
    assert!(term.buffer_contains("New credential set"));
    assert!(term.buffer_contains("Credential key"));
}

#[test]
fn test_confirm_dialog_over_list() {
    let mut state = create_test_state();
    state.section = Section::Tenants;
    state.show_confirm_dialog(ConfirmDialogState::delete(Mutation::DeleteTenant {
        key: "prod".into(),
    }));
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.buffer_contains("Nuke prod?"));
    assert!(term.buffer_contains("[y] Delete"));
}

#[test]
fn test_toasts_drawn_above_modal() {
    let mut state = create_test_state();
    state.open_modal(Modal::Create(CreateModal::new(Collection::Tenants, ModuleCode::Cls)));
    state.notifications.error("Tenant already exists");
    let mut term = TestTerminal::new();
    draw(&mut term, &state);

    assert!(term.buffer_contains("Tenant already exists"));
}

#[test]
fn test_compact_terminal_renders() {
    let mut state = create_connected_state();
    state.data.apply_templates(Ok(sample_templates())).unwrap();
    state.notifications.info("Refreshing");
    let mut term = TestTerminal::compact();
    draw(&mut term, &state);

    assert!(term.buffer_contains("cexdeck"));
    assert!(!term.buffer_contains("Sections"));
}
