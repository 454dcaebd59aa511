// Centralized theme system for consistent UI styling
// All colors and styles are defined here - edit this file to change the look

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// App background - pure black for contrast
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Card/message background - very subtle lift from black
pub const BG_CARD: Color = Color::Rgb(18, 18, 18);

/// Selected item background
pub const BG_SELECTED: Color = Color::Rgb(36, 30, 48);

/// Sidebar background - very dark, almost black
pub const BG_SIDEBAR: Color = Color::Rgb(12, 12, 12);

/// Input field background
pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

/// Skeleton placeholder fill
pub const BG_SKELETON: Color = Color::Rgb(28, 28, 28);

// -----------------------------------------------------------------------------
// Text Colors
// -----------------------------------------------------------------------------

/// Primary text - off-white for readability
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for hints, placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// -----------------------------------------------------------------------------
// Accent Colors
// -----------------------------------------------------------------------------

/// Primary accent - brand purple (focus, assistant, headings)
pub const ACCENT_PRIMARY: Color = Color::Rgb(157, 118, 232);

/// User turns - muted blue
pub const ACCENT_USER: Color = Color::Rgb(86, 156, 214);

/// Success/positive - muted green
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Warning - muted amber/orange
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

/// Error - muted red
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Badge/highlight - soft pink
pub const ACCENT_SPECIAL: Color = Color::Rgb(214, 132, 196);

// -----------------------------------------------------------------------------
// Border Colors
// -----------------------------------------------------------------------------

pub const BORDER_ACTIVE: Color = ACCENT_PRIMARY;

pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// =============================================================================
// STYLE HELPERS
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn text_bold() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Border for a pane, brighter when it has keyboard focus
pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_ACTIVE)
    } else {
        Style::default().fg(BORDER_INACTIVE)
    }
}

pub fn heading() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn action_hint(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT_PRIMARY)
    }
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn input_placeholder() -> Style {
    Style::default()
        .fg(TEXT_DIM)
        .add_modifier(Modifier::ITALIC)
}

pub fn card_bg(selected: bool) -> Style {
    if selected {
        Style::default().bg(BG_SELECTED)
    } else {
        Style::default().bg(BG_CARD)
    }
}

pub fn thinking_indicator() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::ITALIC)
}
