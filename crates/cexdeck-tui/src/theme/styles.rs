//! Semantic style builders.

use cexdeck_app::SessionPhase;
use cexdeck_core::types::{PluginOrigin, Severity};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - used for focused+selected items across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: String) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Indicators ---

/// Connection indicator for the top bar: `(icon, label, Style)`.
pub fn session_indicator(phase: SessionPhase) -> (&'static str, &'static str, Style) {
    match phase {
        SessionPhase::Connected => (
            "●",
            "Connected",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        SessionPhase::Connecting => (
            "↻",
            "Connecting",
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        SessionPhase::Disconnected => ("○", "Disconnected", text_muted()),
    }
}

/// Toast accent for a severity: `(icon, Style)`.
pub fn severity_indicator(severity: Severity) -> (&'static str, Style) {
    match severity {
        Severity::Success => ("✓", Style::default().fg(palette::STATUS_GREEN)),
        Severity::Error => ("✗", Style::default().fg(palette::STATUS_RED)),
        Severity::Warning => ("!", Style::default().fg(palette::STATUS_YELLOW)),
        Severity::Info => ("i", Style::default().fg(palette::STATUS_BLUE)),
    }
}

/// Badge shown on hub cards.
pub fn origin_badge(origin: PluginOrigin) -> Style {
    let color = match origin {
        PluginOrigin::InternalVendor => palette::BADGE_VENDOR,
        PluginOrigin::ThirdParty => palette::BADGE_THIRD_PARTY,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_focused_selected_uses_black_on_cyan() {
        let style = focused_selected();
        assert_eq!(style.fg, Some(palette::CONTRAST_FG));
        assert_eq!(style.bg, Some(palette::ACCENT));
    }

    #[test]
    fn test_session_indicator_per_phase() {
        let (icon, label, style) = session_indicator(SessionPhase::Connected);
        assert_eq!((icon, label), ("●", "Connected"));
        assert_eq!(style.fg, Some(palette::STATUS_GREEN));

        let (_, label, style) = session_indicator(SessionPhase::Connecting);
        assert_eq!(label, "Connecting");
        assert_eq!(style.fg, Some(palette::STATUS_YELLOW));

        let (icon, _, style) = session_indicator(SessionPhase::Disconnected);
        assert_eq!(icon, "○");
        assert_eq!(style.fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_indicator(Severity::Success).1.fg, Some(palette::STATUS_GREEN));
        assert_eq!(severity_indicator(Severity::Error).1.fg, Some(palette::STATUS_RED));
        assert_eq!(severity_indicator(Severity::Warning).1.fg, Some(palette::STATUS_YELLOW));
        assert_eq!(severity_indicator(Severity::Info).1.fg, Some(palette::STATUS_BLUE));
    }

    #[test]
    fn test_origin_badges_differ() {
        assert_ne!(
            origin_badge(PluginOrigin::InternalVendor).fg,
            origin_badge(PluginOrigin::ThirdParty).fg
        );
    }
}
