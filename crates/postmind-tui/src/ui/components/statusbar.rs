// Global status bar at the very bottom of the app.
// Notifications on the left, session state on the right.

use postmind_core::Identity;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::card::{BULLET, HOLLOW_BULLET};
use crate::ui::format::truncate_with_ellipsis;
use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

/// Widest the session column may get before the name is truncated
const SESSION_COLUMN_MAX_WIDTH: usize = 36;

/// Right-hand label and whether it shows a signed-in session
pub(crate) fn session_label(identity: Option<&Identity>) -> (String, bool) {
    match identity {
        Some(Identity::Authenticated { name, email }) => {
            let who = if email.is_empty() { name } else { email };
            (format!("{}{} ", BULLET, who), true)
        }
        Some(Identity::Anonymous) => (format!("{}Not signed in ", HOLLOW_BULLET), false),
        None => (String::new(), false),
    }
}

fn level_color(level: NotificationLevel) -> ratatui::style::Color {
    match level {
        NotificationLevel::Info => theme::ACCENT_PRIMARY,
        NotificationLevel::Success => theme::ACCENT_SUCCESS,
        NotificationLevel::Warning => theme::ACCENT_WARNING,
        NotificationLevel::Error => theme::ACCENT_ERROR,
    }
}

/// `identity` is None outside the chat view, and until the identity check answers.
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    identity: Option<&Identity>,
) {
    let (label, signed_in) = session_label(identity);
    let label = truncate_with_ellipsis(&label, SESSION_COLUMN_MAX_WIDTH);
    let session_width = label.width() as u16 + 1;

    let chunks = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(session_width),
    ])
    .split(area);
    let notification_area = chunks[0];
    let session_area = chunks[1];

    let notification_paragraph = match current_notification {
        Some(notification) => {
            let color = level_color(notification.level);
            let icon = notification.level.icon();
            let available = (notification_area.width as usize).saturating_sub(icon.width() + 2);
            let spans = vec![
                Span::styled(format!(" {} ", icon), Style::default().fg(color)),
                Span::styled(
                    truncate_with_ellipsis(&notification.message, available),
                    Style::default().fg(color),
                ),
            ];
            Paragraph::new(Line::from(spans))
        }
        None => Paragraph::new(""),
    };
    f.render_widget(
        notification_paragraph.style(Style::default().bg(theme::BG_SIDEBAR)),
        notification_area,
    );

    let session_color = if signed_in {
        theme::ACCENT_SUCCESS
    } else {
        theme::TEXT_MUTED
    };
    let padding = (session_area.width as usize).saturating_sub(label.width());
    let session = Paragraph::new(format!("{}{}", " ".repeat(padding), label))
        .style(Style::default().fg(session_color).bg(theme::BG_SIDEBAR));
    f.render_widget(session, session_area);
}
