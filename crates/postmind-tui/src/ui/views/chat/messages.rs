use postmind_core::actions::{action_state, ActionState};
use postmind_core::models::{ChatEntry, EntryContent, Role};
use postmind_core::render::{render_entry, ViewBlock};
use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

use super::cards::{author_line, bottom_half_block_line, card_row, top_half_block_line};
use crate::ui::card::{BULLET, CHECKMARK, REPLY_GLYPH, WARNING_GLYPH};
use crate::ui::format::wrap_text;
use crate::ui::state::ChatScreen;
use crate::ui::theme;

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "Postmind";
pub const EXPIRED_LABEL: &str = "Expired, ask again to redo this";

/// Columns taken by the indicator and padding on each card row
const ROW_CHROME: usize = 4;

fn author_of(entry: &ChatEntry) -> (&'static str, ratatui::style::Color) {
    match (&entry.content, entry.role()) {
        (EntryContent::Failure(_), _) => (ASSISTANT_LABEL, theme::ACCENT_ERROR),
        (_, Role::User) => (USER_LABEL, theme::ACCENT_USER),
        (_, Role::Assistant) => (ASSISTANT_LABEL, theme::ACCENT_PRIMARY),
    }
}

fn block_rows(block: &ViewBlock, text_width: usize) -> Vec<(String, Style)> {
    let wrapped = |text: &str, style: Style| -> Vec<(String, Style)> {
        wrap_text(text, text_width)
            .into_iter()
            .map(|line| (line, style))
            .collect()
    };

    match block {
        ViewBlock::Text(text) => wrapped(text, theme::text_primary()),
        ViewBlock::EmailCard {
            subject,
            from,
            summary,
        } => {
            let mut rows = wrapped(&format!("{}{}", BULLET, subject), theme::text_bold());
            rows.extend(wrapped(
                &format!("  {}", from),
                Style::default().fg(theme::ACCENT_USER),
            ));
            if !summary.is_empty() {
                rows.extend(wrapped(&format!("  {}", summary), theme::text_muted()));
            }
            rows
        }
        ViewBlock::ReplyDraft {
            original_subject,
            reply,
        } => {
            let mut rows = wrapped(
                &format!("{}Reply to: {}", REPLY_GLYPH, original_subject),
                theme::text_bold(),
            );
            rows.push((String::new(), Style::default()));
            rows.extend(wrapped(
                reply,
                theme::text_primary().add_modifier(Modifier::ITALIC),
            ));
            rows
        }
        ViewBlock::DeleteTarget { subject, from } => {
            let mut rows = wrapped(
                "Delete this email?",
                Style::default().fg(theme::ACCENT_WARNING),
            );
            rows.extend(wrapped(&format!("{}{}", BULLET, subject), theme::text_bold()));
            rows.extend(wrapped(
                &format!("  {}", from),
                Style::default().fg(theme::ACCENT_USER),
            ));
            rows
        }
        ViewBlock::Notice(text) => wrapped(text, theme::text_muted()),
        ViewBlock::Error(text) => wrapped(&format!("{}{}", WARNING_GLYPH, text), theme::status_error()),
    }
}

/// Every card in the conversation, top to bottom. `focused` says whether the
/// conversation pane has keyboard focus, which decides if the open action is
/// highlighted.
pub(crate) fn message_lines(chat: &ChatScreen, width: usize, focused: bool) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(ROW_CHROME).max(1);
    let mut lines = Vec::new();

    for (index, entry) in chat.conversation.entries().iter().enumerate() {
        let view = render_entry(entry);
        if view.is_empty() {
            continue;
        }
        let (author, color) = author_of(entry);
        let bg = theme::BG_CARD;

        lines.push(top_half_block_line(color, bg, width));
        lines.push(author_line(author, &entry.time_label(), color, bg, width));

        for (i, block) in view.blocks.iter().enumerate() {
            // Spacer between consecutive email cards
            if i > 0 && matches!(block, ViewBlock::EmailCard { .. }) {
                lines.push(card_row("", Style::default(), color, bg, width));
            }
            for (text, style) in block_rows(block, text_width) {
                lines.push(card_row(&text, style, color, bg, width));
            }
        }

        for action in &view.actions {
            lines.push(card_row("", Style::default(), color, bg, width));
            let (text, style) = match action_state(&chat.conversation, index, action) {
                ActionState::Open => (
                    format!("[Enter] {}", action.label()),
                    theme::action_hint(focused),
                ),
                ActionState::Confirmed => (format!("{}Confirmed", CHECKMARK), theme::text_dim()),
                ActionState::Superseded => (EXPIRED_LABEL.to_string(), theme::text_dim()),
            };
            lines.push(card_row(&text, style, color, bg, width));
        }

        lines.push(bottom_half_block_line(color, bg, width));
        lines.push(Line::from(""));
    }
    lines
}

/// Plain text of a rendered line, card edge stripped
#[cfg(test)]
pub(crate) fn line_text(line: &Line) -> String {
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    text.trim_start_matches(crate::ui::card::CARD_EDGE)
        .trim()
        .to_string()
}
