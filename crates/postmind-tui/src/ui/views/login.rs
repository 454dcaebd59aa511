use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::card::SPARKLES;
use crate::ui::format::mask;
use crate::ui::{layout, theme, App};

const PANEL_WIDTH: u16 = 72;

pub fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let panel = layout::centered(area, PANEL_WIDTH, 16);
    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(panel);

    let welcome = vec![
        Line::from(Span::styled(SPARKLES, theme::text_primary())),
        Line::from(Span::styled("Welcome to", theme::text_bold())),
        Line::from(Span::styled("Postmind AI", theme::heading())),
        Line::from(Span::styled(
            "Your intelligent Gmail assistant powered by AI",
            theme::text_muted(),
        )),
    ];
    f.render_widget(
        Paragraph::new(welcome).alignment(Alignment::Center),
        chunks[0],
    );

    let login_url = app.client().login_url();
    let steps = vec![
        Line::from(vec![
            Span::styled("1. Continue with Google: ", theme::text_primary()),
            Span::styled(login_url.to_string(), Style::default().fg(theme::ACCENT_USER)),
        ]),
        Line::from(vec![
            Span::styled("   press ", theme::text_dim()),
            Span::styled("o", theme::text_primary()),
            Span::styled(" to open it in your browser", theme::text_dim()),
        ]),
        Line::from(Span::styled(
            "2. Paste the session cookie the backend set, then press Enter",
            theme::text_primary(),
        )),
        Line::from(Span::styled(
            "   Secure OAuth. No emails stored.",
            theme::text_dim(),
        )),
    ];
    f.render_widget(Paragraph::new(steps), chunks[1]);

    let input_text = if app.login_input.is_empty() {
        Span::styled("session=...", theme::input_placeholder())
    } else {
        Span::styled(
            mask(&app.login_input.text),
            Style::default().fg(theme::ACCENT_WARNING),
        )
    };
    let input = Paragraph::new(Line::from(input_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(true))
            .title(" Session cookie "),
    );
    f.render_widget(input, chunks[3]);

    let typed = app.login_input.text[..app.login_input.cursor].chars().count() as u16;
    let cursor_x = (chunks[3].x + 1 + typed).min(chunks[3].right().saturating_sub(2));
    f.set_cursor_position((cursor_x, chunks[3].y + 1));

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Enter", theme::text_primary()),
        Span::styled(" sign in  ", theme::text_dim()),
        Span::styled("Esc", theme::text_primary()),
        Span::styled(" back", theme::text_dim()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hints, chunks[4]);
}
