use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::card::SPARKLES;
use crate::ui::format::wrap_text;
use crate::ui::{layout, theme};

pub const PRODUCT_NAME: &str = "Postmind AI";
pub const HEADLINE: &str = "Intelligent Email Automation for Modern Users.";
pub const BLURB: &str = "Postmind uses AI to read, summarize, reply and manage your inbox \
                         using simple natural language commands.";

const CONTENT_WIDTH: u16 = 64;

pub(crate) fn landing_lines(width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(PRODUCT_NAME, theme::heading())),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} AI Powered Gmail Assistant ", SPARKLES),
            Style::default().fg(theme::ACCENT_SPECIAL).bg(theme::BG_CARD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            HEADLINE,
            theme::text_bold().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        wrap_text(BLURB, width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, theme::text_muted()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter ", theme::action_hint(true)),
        Span::styled(" Get started   ", theme::text_muted()),
        Span::styled("q", theme::text_primary()),
        Span::styled(" quit", theme::text_dim()),
    ]));
    lines
}

pub fn render_landing(f: &mut Frame, area: Rect) {
    let lines = landing_lines(CONTENT_WIDTH.min(area.width) as usize);
    let box_area = layout::centered(area, CONTENT_WIDTH, lines.len() as u16);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        box_area,
    );
}
