use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{input, messages};
use crate::ui::card::WARNING_GLYPH;
use crate::ui::components::render_statusbar;
use crate::ui::state::{ChatFocus, ChatScreen};
use crate::ui::views::render_inbox;
use crate::ui::{layout, theme, App};

pub const TITLE: &str = "Postmind";
pub const QUIT_WARNING: &str = "Press Ctrl+C again to quit";

/// Key hints for the footer, depending on which pane has focus
pub(crate) fn footer_hints(focus: ChatFocus) -> &'static str {
    match focus {
        ChatFocus::Input => "Enter send \u{00b7} Tab focus \u{00b7} PgUp/PgDn scroll \u{00b7} Ctrl+L sign in",
        ChatFocus::Conversation => {
            "\u{2191}/\u{2193} scroll \u{00b7} Enter confirm \u{00b7} Tab focus \u{00b7} Esc back"
        }
        ChatFocus::Inbox => {
            "\u{2191}/\u{2193} select \u{00b7} d delete \u{00b7} r refresh \u{00b7} Tab focus \u{00b7} Esc back"
        }
    }
}

/// Top row of the conversation window for a scroll offset counted from the
/// bottom. Offsets past the top are clamped.
pub(crate) fn scroll_top(total_lines: usize, visible: usize, offset_from_bottom: usize) -> usize {
    let max_scroll = total_lines.saturating_sub(visible);
    max_scroll - offset_from_bottom.min(max_scroll)
}

pub(crate) fn render_footer(f: &mut Frame, area: Rect, hints: &str, pending_quit: bool) {
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let line = if pending_quit {
        Line::from(Span::styled(
            format!("{}{}{}", padding, WARNING_GLYPH, QUIT_WARNING),
            Style::default().fg(theme::ACCENT_WARNING),
        ))
    } else {
        Line::from(Span::styled(format!("{}{}", padding, hints), theme::text_dim()))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_conversation(f: &mut Frame, chat: &ChatScreen, area: Rect) {
    let area = layout::with_horizontal_padding(area, 1);
    let lines = messages::message_lines(
        chat,
        area.width as usize,
        chat.focus == ChatFocus::Conversation,
    );
    let top = scroll_top(lines.len(), area.height as usize, chat.scroll_offset);
    f.render_widget(Paragraph::new(lines).scroll((top as u16, 0)), area);
}

pub fn render_chat(f: &mut Frame, app: &App, area: Rect) {
    let bg_block = Block::default().style(Style::default().bg(theme::BG_APP));
    f.render_widget(bg_block, area);

    let Some(chat) = app.chat.as_ref() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT_CHAT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(area);

    let chrome_color = if app.pending_quit {
        theme::ACCENT_ERROR
    } else {
        theme::ACCENT_PRIMARY
    };
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let header = Paragraph::new(format!("\n{}{}", padding, TITLE)).style(
        Style::default()
            .fg(chrome_color)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(header, chunks[0]);

    let (inbox_area, chat_area) = layout::split_chat_body(chunks[1]);
    render_inbox(
        f,
        &chat.inbox,
        inbox_area,
        chat.focus == ChatFocus::Inbox,
        app.animation().shimmer_on(),
    );

    let column = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(layout::THINKING_HEIGHT),
        Constraint::Length(layout::INPUT_HEIGHT),
    ])
    .split(layout::with_content_padding(chat_area));

    render_conversation(f, chat, column[0]);
    input::render_thinking_line(f, chat, app.animation(), column[1]);
    input::render_input_box(f, chat, column[2], chat.focus == ChatFocus::Input);

    render_footer(f, chunks[2], footer_hints(chat.focus), app.pending_quit);
    render_statusbar(
        f,
        chunks[3],
        app.current_notification(),
        chat.identity.as_ref(),
    );
}
