use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::ui;
use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::views::chat::layout::render_footer;
use crate::ui::views::{render_landing, render_login};
use crate::ui::{App, View};

const LANDING_HINTS: &str = "Enter get started \u{00b7} q quit";
const LOGIN_HINTS: &str = "o open login page \u{00b7} Enter sign in \u{00b7} Esc back";

pub(crate) fn render(f: &mut Frame, app: &App) {
    // Fill entire frame with app background
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    // Chat view has its own chrome
    if app.view == View::Chat {
        ui::views::render_chat(f, app, f.area());
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    let hints = match app.view {
        View::Landing => {
            render_landing(f, chunks[0]);
            LANDING_HINTS
        }
        View::Login => {
            render_login(f, app, chunks[0]);
            LOGIN_HINTS
        }
        View::Chat => "",
    };

    render_footer(f, chunks[1], hints, app.pending_quit);
    render_statusbar(f, chunks[2], app.current_notification(), None);
}
