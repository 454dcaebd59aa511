// Centralized layout constants and utilities for consistent UI across all views

use ratatui::layout::{Constraint, Layout, Rect};

// =============================================================================
// PADDING CONSTANTS
// =============================================================================

/// Standard horizontal padding for main content areas (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

// =============================================================================
// SIDEBAR CONSTANTS
// =============================================================================

/// Inbox sidebar share of the chat view width
pub const INBOX_WIDTH_PERCENT: u16 = 32;

/// Narrowest the inbox may get before the chat pane takes the whole row
pub const INBOX_MIN_WIDTH: u16 = 24;

/// Rows per inbox card including the spacer line under it
pub const INBOX_CARD_HEIGHT: u16 = 5;

// =============================================================================
// CHROME CONSTANTS
// =============================================================================

/// Header height for chat view (title area)
pub const HEADER_HEIGHT_CHAT: u16 = 2;

/// Footer height (help bar)
pub const FOOTER_HEIGHT: u16 = 1;

/// Status bar height (single line at very bottom of app)
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Input box height including its border
pub const INPUT_HEIGHT: u16 = 3;

/// Line under the conversation for the thinking indicator
pub const THINKING_HEIGHT: u16 = 1;

// =============================================================================
// LAYOUT HELPER FUNCTIONS
// =============================================================================

/// Apply horizontal padding to a Rect (reduces width and shifts x)
#[inline]
pub fn with_horizontal_padding(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding.min(area.width / 2),
        y: area.y,
        width: area.width.saturating_sub(padding * 2),
        height: area.height,
    }
}

/// Apply content padding to a Rect (uses CONTENT_PADDING_H)
#[inline]
pub fn with_content_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, CONTENT_PADDING_H)
}

/// Center a box of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Split the chat body into (inbox, conversation). On narrow terminals the
/// inbox is hidden and gets a zero-width rect.
pub fn split_chat_body(area: Rect) -> (Rect, Rect) {
    let inbox_width = area.width * INBOX_WIDTH_PERCENT / 100;
    if inbox_width < INBOX_MIN_WIDTH {
        return (Rect { width: 0, ..area }, area);
    }
    let chunks = Layout::horizontal([
        Constraint::Length(inbox_width),
        Constraint::Min(0),
    ])
    .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_never_overflows() {
        let area = Rect::new(0, 0, 3, 1);
        let padded = with_content_padding(area);
        assert!(padded.x + padded.width <= area.x + area.width);
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered(area, 60, 10);
        assert_eq!(inner, Rect::new(20, 15, 60, 10));

        let clamped = centered(Rect::new(0, 0, 10, 5), 60, 10);
        assert_eq!(clamped, Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn test_chat_body_split() {
        let (inbox, chat) = split_chat_body(Rect::new(0, 0, 100, 30));
        assert_eq!(inbox.width, 32);
        assert_eq!(chat.width, 68);

        let (inbox, chat) = split_chat_body(Rect::new(0, 0, 60, 30));
        assert_eq!(inbox.width, 0);
        assert_eq!(chat.width, 60);
    }
}
