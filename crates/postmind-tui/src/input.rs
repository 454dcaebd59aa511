use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use postmind_core::SubmitRejected;

use crate::ui::notifications::Notification;
use crate::ui::state::{ChatFocus, ChatScreen};
use crate::ui::text_editor::TextEditor;
use crate::ui::{App, View};

/// Lines moved per PageUp/PageDown
const PAGE_SCROLL: usize = 10;
/// Lines moved per mouse wheel notch
const WHEEL_SCROLL: usize = 3;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    match app.view {
        View::Landing => handle_landing_key(app, key),
        View::Login => handle_login_key(app, key),
        View::Chat => handle_chat_key(app, key),
    }
}

/// Bracketed paste goes to whichever text field is active
pub(crate) fn handle_paste(app: &mut App, text: &str) {
    match app.view {
        View::Login => app.login_input.handle_paste(text),
        View::Chat => {
            if let Some(chat) = app.chat.as_mut() {
                if chat.focus == ChatFocus::Input && !chat.conversation.is_pending() {
                    chat.editor.handle_paste(text);
                }
            }
        }
        View::Landing => {}
    }
}

pub(crate) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(chat) = app.chat.as_mut() else {
        return;
    };
    match mouse.kind {
        MouseEventKind::ScrollUp => chat.scroll_up(WHEEL_SCROLL),
        MouseEventKind::ScrollDown => chat.scroll_down(WHEEL_SCROLL),
        _ => {}
    }
}

fn handle_landing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.show_login(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.show_landing(),
        KeyCode::Enter => app.complete_login(),
        KeyCode::Char('o') if ctrl => app.open_login_page(),
        // A bare `o` only opens the browser before anything was typed
        KeyCode::Char('o') if app.login_input.is_empty() => app.open_login_page(),
        _ => {
            handle_editor_key(&mut app.login_input, key);
        }
    }
}

/// Shared line editing keys. Returns false when the key is not an editing key.
fn handle_editor_key(editor: &mut TextEditor, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => editor.move_to_line_start(),
        KeyCode::Char('e') if ctrl => editor.move_to_line_end(),
        KeyCode::Char('k') if ctrl => editor.kill_to_line_end(),
        KeyCode::Char('u') if ctrl => editor.kill_to_line_start(),
        KeyCode::Char('w') if ctrl => editor.delete_word_backward(),
        KeyCode::Char(_) if ctrl => return false,
        KeyCode::Char(c) => editor.insert_char(c),
        KeyCode::Backspace => editor.delete_char_before(),
        KeyCode::Delete => editor.delete_char_at(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Home => editor.move_to_line_start(),
        KeyCode::End => editor.move_to_line_end(),
        _ => return false,
    }
    true
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Keys that work regardless of focus
    if ctrl && key.code == KeyCode::Char('l') {
        app.show_login();
        return;
    }

    let Some(chat) = app.chat.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab => {
            chat.focus = chat.focus.next();
            return;
        }
        KeyCode::BackTab => {
            chat.focus = chat.focus.prev();
            return;
        }
        KeyCode::Esc => {
            chat.focus = ChatFocus::Input;
            return;
        }
        KeyCode::PageUp => {
            chat.scroll_up(PAGE_SCROLL);
            return;
        }
        KeyCode::PageDown => {
            chat.scroll_down(PAGE_SCROLL);
            return;
        }
        _ => {}
    }

    let notice = match chat.focus {
        ChatFocus::Input => handle_chat_input_key(chat, key),
        ChatFocus::Conversation => handle_conversation_key(chat, key),
        ChatFocus::Inbox => handle_inbox_key(chat, key),
    };
    if let Some(notification) = notice {
        app.notify(notification);
    }
}

fn rejection_notice(rejected: SubmitRejected) -> Option<Notification> {
    match rejected {
        SubmitRejected::Empty => None,
        other => Some(Notification::warning(other.to_string())),
    }
}

fn handle_chat_input_key(chat: &mut ChatScreen, key: KeyEvent) -> Option<Notification> {
    if key.code == KeyCode::Enter {
        return chat.submit_input().err().and_then(rejection_notice);
    }
    // Typing is ignored until the reply arrives
    if chat.conversation.is_pending() {
        return None;
    }
    handle_editor_key(&mut chat.editor, key);
    None
}

fn handle_conversation_key(chat: &mut ChatScreen, key: KeyEvent) -> Option<Notification> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => chat.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => chat.scroll_down(1),
        KeyCode::Enter => {
            return match chat.confirm_open_action() {
                Ok(true) => None,
                Ok(false) => Some(Notification::info("Nothing to confirm")),
                Err(rejected) => rejection_notice(rejected),
            };
        }
        _ => {}
    }
    None
}

fn handle_inbox_key(chat: &mut ChatScreen, key: KeyEvent) -> Option<Notification> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => chat.inbox.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => chat.inbox.select_next(),
        KeyCode::Char('r') => {
            chat.refresh_inbox();
            return Some(Notification::info("Refreshing inbox"));
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if chat.delete_selected_email() {
                return Some(Notification::info("Deleting email..."));
            }
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmind_core::{ApiClient, ClientConfig};

    fn app() -> App {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        App::new(ApiClient::new(&config).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_landing_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.view, View::Landing);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Login);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Landing);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_login_typing_and_submit() {
        let mut app = app();
        app.show_login();
        type_text(&mut app, "session=abc");
        assert_eq!(app.login_input.text, "session=abc");
        ctrl(&mut app, 'w');
        assert_eq!(app.login_input.text, "");
        type_text(&mut app, "tok");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Chat);
        assert!(app.chat.is_some());
    }

    #[tokio::test]
    async fn test_chat_enter_submits_and_locks_input() {
        let mut app = app();
        app.show_chat();
        type_text(&mut app, "show my emails");
        press(&mut app, KeyCode::Enter);

        let chat = app.chat.as_ref().unwrap();
        assert!(chat.conversation.is_pending());
        assert!(chat.editor.is_empty());
        assert_eq!(chat.conversation.len(), 2);

        // Typing while waiting does nothing
        type_text(&mut app, "hi");
        assert!(app.chat.as_ref().unwrap().editor.is_empty());
    }

    #[tokio::test]
    async fn test_enter_on_blank_input_sends_nothing() {
        let mut app = app();
        app.show_chat();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        let chat = app.chat.as_ref().unwrap();
        assert_eq!(chat.conversation.len(), 1);
        assert!(!chat.conversation.is_pending());
        assert!(app.current_notification().is_none());
    }

    #[tokio::test]
    async fn test_tab_cycles_focus_and_esc_returns_to_input() {
        let mut app = app();
        app.show_chat();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.chat.as_ref().unwrap().focus, ChatFocus::Conversation);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.chat.as_ref().unwrap().focus, ChatFocus::Inbox);

        // Letters in the inbox are commands, not text
        press(&mut app, KeyCode::Char('j'));
        assert!(app.chat.as_ref().unwrap().editor.is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.chat.as_ref().unwrap().focus, ChatFocus::Input);
    }

    #[tokio::test]
    async fn test_ctrl_l_signs_out() {
        let mut app = app();
        app.show_chat();
        ctrl(&mut app, 'l');
        assert_eq!(app.view, View::Login);
        assert!(app.chat.is_none());
    }

    #[tokio::test]
    async fn test_page_keys_scroll_conversation() {
        let mut app = app();
        app.show_chat();
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.chat.as_ref().unwrap().scroll_offset, PAGE_SCROLL);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.chat.as_ref().unwrap().scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_paste_into_chat_input() {
        let mut app = app();
        app.show_chat();
        handle_paste(&mut app, "reply to\nemail 1");
        assert_eq!(app.chat.as_ref().unwrap().editor.text, "reply to email 1");
    }
}
