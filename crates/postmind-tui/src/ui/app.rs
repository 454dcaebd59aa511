use postmind_core::{ApiClient, RefreshBus};
use tracing::{info, warn};

use crate::ui::notifications::Notification;
use crate::ui::services::{AnimationClock, NotificationManager};
use crate::ui::state::{ChatNotice, ChatScreen, ChatSignal};
use crate::ui::text_editor::TextEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Login,
    Chat,
}

pub struct App {
    pub running: bool,
    /// First Ctrl+C arms quit, the second one quits
    pub pending_quit: bool,
    pub view: View,
    /// Cookie field on the login view
    pub login_input: TextEditor,
    /// Present exactly while the chat view is mounted
    pub chat: Option<ChatScreen>,
    client: ApiClient,
    refresh: RefreshBus,
    notifications: NotificationManager,
    animation: AnimationClock,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            running: true,
            pending_quit: false,
            view: View::Landing,
            login_input: TextEditor::new(),
            chat: None,
            client,
            refresh: RefreshBus::new(),
            notifications: NotificationManager::new(),
            animation: AnimationClock::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) {
        self.animation.tick();
        self.notifications.tick();
    }

    pub fn animation(&self) -> &AnimationClock {
        &self.animation
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.notify(notification);
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    pub fn show_landing(&mut self) {
        self.unmount_chat();
        self.view = View::Landing;
    }

    pub fn show_login(&mut self) {
        self.unmount_chat();
        self.login_input.clear();
        self.view = View::Login;
    }

    /// Mount a fresh chat view. Any previous one is dropped first so its
    /// requests are cancelled.
    pub fn show_chat(&mut self) {
        self.unmount_chat();
        self.chat = Some(ChatScreen::mount(self.client.clone(), &self.refresh));
        self.view = View::Chat;
    }

    fn unmount_chat(&mut self) {
        if let Some(chat) = self.chat.take() {
            info!(
                "Chat view unmounted ({} requests cancelled)",
                chat.background_tasks()
            );
        }
    }

    /// Open the OAuth login page in the system browser
    pub fn open_login_page(&mut self) {
        let url = self.client.login_url();
        match open::that(url.as_str()) {
            Ok(()) => self.notify(Notification::info("Opened the login page in your browser")),
            Err(e) => {
                warn!("Failed to open browser: {}", e);
                self.notify(Notification::warning(format!("Open {} in your browser", url)));
            }
        }
    }

    /// Install the pasted session cookie and enter the chat.
    pub fn complete_login(&mut self) {
        let raw = self.login_input.take();
        if !self.client.install_session(&raw) {
            self.notify(Notification::warning("Paste the session cookie first"));
            return;
        }
        info!("Session cookie installed");
        self.notify(Notification::success("Signed in"));
        self.show_chat();
    }

    /// Wait for the mounted chat view to need attention. Never resolves when
    /// no chat is mounted.
    pub async fn next_chat_signal(&mut self) -> ChatSignal {
        match self.chat.as_mut() {
            Some(chat) => chat.next_signal().await,
            None => std::future::pending().await,
        }
    }

    pub fn handle_chat_signal(&mut self, signal: ChatSignal) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        match chat.handle_signal(signal) {
            Some(ChatNotice::Notify(notification)) => self.notify(notification),
            Some(ChatNotice::ApiError { context, error }) => {
                self.notifications.notify_api_error(context, &error)
            }
            None => {}
        }
    }
}
