//! Inbox sidebar: skeleton while loading, then one card per email.

use postmind_core::inbox::{InboxCard, InboxView};
use postmind_core::InboxPanel;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::card::{CARD_EDGE, SKELETON_FILL, TRASH_GLYPH};
use crate::ui::format::truncate_with_ellipsis;
use crate::ui::{layout, theme};

pub const EMPTY_TEXT: &str = "No emails found.";
pub const SIGNED_OUT_TEXT: &str = "Sign in to see your inbox.";

fn padded(mut spans: Vec<Span<'static>>, used: usize, width: usize, bg: Style) -> Line<'static> {
    let pad = width.saturating_sub(used);
    if pad > 0 {
        spans.push(Span::styled(" ".repeat(pad), bg));
    }
    Line::from(spans)
}

fn card_lines(card: &InboxCard<'_>, width: usize) -> Vec<Line<'static>> {
    let bg = theme::card_bg(card.selected);
    let edge_color = if card.selected {
        theme::ACCENT_PRIMARY
    } else {
        theme::BORDER_INACTIVE
    };
    let edge = || Span::styled(format!("{} ", CARD_EDGE), bg.fg(edge_color));
    let text_width = width.saturating_sub(2);

    let mut header = format!("Email {}", card.number);
    if card.deleting {
        header.push_str(&format!("  {}deleting", TRASH_GLYPH));
    }
    let header = truncate_with_ellipsis(&header, text_width);
    let subject = truncate_with_ellipsis(&card.email.subject, text_width);
    let from = truncate_with_ellipsis(&card.email.from, text_width);
    let summary = truncate_with_ellipsis(&card.email.summary, text_width);

    let row = |text: String, style: Style| {
        let used = 2 + unicode_width::UnicodeWidthStr::width(text.as_str());
        padded(vec![edge(), Span::styled(text, bg.patch(style))], used, width, bg)
    };

    vec![
        row(header, Style::default().fg(theme::TEXT_DIM)),
        row(subject, theme::text_bold()),
        row(from, Style::default().fg(theme::ACCENT_USER)),
        row(summary, theme::text_muted()),
        Line::from(""),
    ]
}

fn skeleton_lines(rows: usize, width: usize, shimmer: bool) -> Vec<Line<'static>> {
    let color = if shimmer {
        theme::BORDER_INACTIVE
    } else {
        theme::BG_SKELETON
    };
    let style = Style::default().fg(color).bg(theme::BG_CARD);
    let bar = |share: usize| {
        let len = (width.saturating_sub(2) * share / 100).max(1);
        Line::from(vec![
            Span::styled(format!("{} ", CARD_EDGE), style),
            Span::styled(SKELETON_FILL.to_string().repeat(len), style),
        ])
    };

    (0..rows)
        .flat_map(|_| vec![bar(30), bar(80), bar(50), bar(90), Line::from("")])
        .collect()
}

fn notice_line(text: &str, style: Style) -> Vec<Line<'static>> {
    vec![Line::from(""), Line::from(Span::styled(text.to_string(), style))]
}

/// Lines for the panel body, plus the index of the first line of the
/// selected card when there is one.
pub(crate) fn inbox_lines(
    panel: &InboxPanel,
    width: usize,
    shimmer: bool,
) -> (Vec<Line<'static>>, Option<usize>) {
    match panel.view() {
        InboxView::Skeleton(rows) => (skeleton_lines(rows, width, shimmer), None),
        InboxView::Empty => (notice_line(EMPTY_TEXT, theme::text_muted()), None),
        InboxView::SignedOut => (notice_line(SIGNED_OUT_TEXT, theme::text_muted()), None),
        InboxView::Failed(error) => {
            let mut lines = notice_line(&error.to_string(), theme::status_error());
            lines.push(Line::from(Span::styled("Press r to retry", theme::text_dim())));
            (lines, None)
        }
        InboxView::Cards(cards) => {
            let selected = cards
                .iter()
                .position(|card| card.selected)
                .map(|i| i * layout::INBOX_CARD_HEIGHT as usize);
            let lines = cards.iter().flat_map(|card| card_lines(card, width)).collect();
            (lines, selected)
        }
    }
}

pub fn render_inbox(f: &mut Frame, panel: &InboxPanel, area: Rect, focused: bool, shimmer: bool) {
    if area.width == 0 {
        return;
    }
    let title = if panel.is_loading() {
        " Inbox ".to_string()
    } else {
        format!(" Inbox ({}) ", panel.emails().len())
    };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme::border(focused))
        .title(Span::styled(
            title,
            theme::heading().add_modifier(if focused {
                Modifier::empty()
            } else {
                Modifier::DIM
            }),
        ))
        .style(Style::default().bg(theme::BG_SIDEBAR));
    let inner = layout::with_horizontal_padding(block.inner(area), 1);
    f.render_widget(block, area);

    let body = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let (lines, selected_line) = inbox_lines(panel, body.width as usize, shimmer);

    // Keep the selected card fully on screen
    let visible = body.height as usize;
    let scroll = selected_line
        .map(|line| (line + layout::INBOX_CARD_HEIGHT as usize).saturating_sub(visible))
        .unwrap_or(0);
    f.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), body);
}
