use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::ui::services::AnimationClock;
use crate::ui::state::ChatScreen;
use crate::ui::theme;

pub const PLACEHOLDER: &str = "Type a command, e.g. show my emails";
pub const THINKING: &str = "Thinking...";

/// Drop leading characters until `text` fits in `width` cells, so the end of
/// a long command stays visible while typing. Returns the visible tail and
/// how many cells were dropped.
pub(crate) fn visible_tail(text: &str, cursor_column: usize, width: usize) -> (String, usize) {
    if width == 0 || cursor_column < width {
        return (text.to_string(), 0);
    }
    let skip = cursor_column + 1 - width;
    let mut dropped = 0;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if dropped >= skip {
            start = i;
            break;
        }
        dropped += c.width().unwrap_or(0);
        start = i + c.len_utf8();
    }
    (text[start..].to_string(), dropped)
}

pub(crate) fn render_thinking_line(f: &mut Frame, chat: &ChatScreen, clock: &AnimationClock, area: Rect) {
    if !chat.conversation.is_pending() {
        return;
    }
    let line = Line::from(Span::styled(
        format!("{} {}", clock.spinner_char(), THINKING),
        theme::thinking_indicator(),
    ));
    f.render_widget(Paragraph::new(line), area);
}

/// The input box is inert while a reply is pending.
pub(crate) fn render_input_box(f: &mut Frame, chat: &ChatScreen, area: Rect, focused: bool) {
    let pending = chat.conversation.is_pending();
    let active = focused && !pending;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(active))
        .style(ratatui::style::Style::default().bg(theme::BG_INPUT));
    let inner = block.inner(area);

    let content = if chat.editor.is_empty() {
        let hint = if pending { THINKING } else { PLACEHOLDER };
        Line::from(Span::styled(hint, theme::input_placeholder()))
    } else {
        let (tail, _) = visible_tail(
            &chat.editor.text,
            chat.editor.cursor_column(),
            inner.width as usize,
        );
        let style = if active {
            theme::text_primary()
        } else {
            theme::text_muted()
        };
        Line::from(Span::styled(tail, style))
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if active {
        let (_, dropped) = visible_tail(
            &chat.editor.text,
            chat.editor.cursor_column(),
            inner.width as usize,
        );
        let column = chat.editor.cursor_column().saturating_sub(dropped) as u16;
        f.set_cursor_position((inner.x + column.min(inner.width.saturating_sub(1)), inner.y));
    }
}
