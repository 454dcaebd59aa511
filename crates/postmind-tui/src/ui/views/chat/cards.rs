use crate::ui::theme;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Half-block characters for vertical padding
const LOWER_HALF_BLOCK: char = '▄';
const UPPER_HALF_BLOCK: char = '▀';

fn half_block_line(glyph: char, indicator_color: Color, bg: Color, width: usize) -> Line<'static> {
    let mut spans = vec![Span::styled(
        glyph.to_string(),
        Style::default().fg(indicator_color).bg(theme::BG_APP),
    )];
    if width > 1 {
        spans.push(Span::styled(
            glyph.to_string().repeat(width - 1),
            Style::default().fg(bg).bg(theme::BG_APP),
        ));
    }
    Line::from(spans)
}

/// Top edge of a card: lower half blocks so the card seems to start mid-row
pub(crate) fn top_half_block_line(indicator_color: Color, bg: Color, width: usize) -> Line<'static> {
    half_block_line(LOWER_HALF_BLOCK, indicator_color, bg, width)
}

/// Bottom edge of a card
pub(crate) fn bottom_half_block_line(
    indicator_color: Color,
    bg: Color,
    width: usize,
) -> Line<'static> {
    half_block_line(UPPER_HALF_BLOCK, indicator_color, bg, width)
}

pub(crate) fn pad_line(spans: &mut Vec<Span<'static>>, current_len: usize, width: usize, bg: Color) {
    let pad = width.saturating_sub(current_len);
    if pad > 0 {
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    }
}

/// One content row inside a card: indicator, two spaces, text, fill
pub(crate) fn card_row(
    text: &str,
    style: Style,
    indicator_color: Color,
    bg: Color,
    width: usize,
) -> Line<'static> {
    let mut spans = vec![
        Span::styled("│", Style::default().fg(indicator_color).bg(bg)),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(text.to_string(), style.bg(bg)),
    ];
    let used = 3 + unicode_width::UnicodeWidthStr::width(text);
    pad_line(&mut spans, used, width, bg);
    Line::from(spans)
}

pub(crate) fn author_line(
    author: &str,
    time: &str,
    indicator_color: Color,
    bg: Color,
    width: usize,
) -> Line<'static> {
    let mut spans = vec![
        Span::styled("│", Style::default().fg(indicator_color).bg(bg)),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(
            author.to_string(),
            Style::default()
                .fg(indicator_color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", time), Style::default().fg(theme::TEXT_DIM).bg(bg)),
    ];
    let used = 3
        + unicode_width::UnicodeWidthStr::width(author)
        + 2
        + unicode_width::UnicodeWidthStr::width(time);
    pad_line(&mut spans, used, width, bg);
    Line::from(spans)
}
