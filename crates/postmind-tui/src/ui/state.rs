//! State of a mounted chat view.
//!
//! A [`ChatScreen`] owns everything that lives only while the chat is on
//! screen: the conversation, the inbox snapshot, the input editor and the
//! background requests. Dropping it unmounts the view; outstanding requests
//! are aborted with its [`TaskScope`] and their results never arrive.

use postmind_core::actions::{self, OpenAction};
use postmind_core::inbox::DeleteOutcome;
use postmind_core::session::FALLBACK_NAME;
use postmind_core::{
    ApiClient, ClientEvent, CommandDispatcher, Conversation, Identity, InboxPanel, InboxRefresh,
    RefreshBus, SubmitRejected, TaskScope,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::ui::notifications::Notification;
use crate::ui::text_editor::TextEditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFocus {
    Input,
    Conversation,
    Inbox,
}

impl ChatFocus {
    pub fn next(self) -> Self {
        match self {
            ChatFocus::Input => ChatFocus::Conversation,
            ChatFocus::Conversation => ChatFocus::Inbox,
            ChatFocus::Inbox => ChatFocus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ChatFocus::Input => ChatFocus::Inbox,
            ChatFocus::Conversation => ChatFocus::Input,
            ChatFocus::Inbox => ChatFocus::Conversation,
        }
    }
}

/// What woke the chat view up
#[derive(Debug)]
pub enum ChatSignal {
    Event(ClientEvent),
    InboxRefresh,
}

/// Something the app should tell the user about after handling a signal
#[derive(Debug)]
pub enum ChatNotice {
    Notify(Notification),
    ApiError {
        context: &'static str,
        error: postmind_core::ApiError,
    },
}

pub struct ChatScreen {
    pub conversation: Conversation,
    pub inbox: InboxPanel,
    /// None until the identity check answers
    pub identity: Option<Identity>,
    pub editor: TextEditor,
    pub focus: ChatFocus,
    /// Lines scrolled up from the bottom of the conversation
    pub scroll_offset: usize,
    dispatcher: CommandDispatcher,
    tasks: TaskScope,
    events_tx: UnboundedSender<ClientEvent>,
    events_rx: UnboundedReceiver<ClientEvent>,
    refresh_rx: broadcast::Receiver<InboxRefresh>,
}

impl ChatScreen {
    /// Mount the view: greet with the fallback name, then look up the session
    /// and load the inbox in the background.
    pub fn mount(client: ApiClient, refresh: &RefreshBus) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut screen = Self {
            conversation: Conversation::new(),
            inbox: InboxPanel::new(),
            identity: None,
            editor: TextEditor::new(),
            focus: ChatFocus::Input,
            scroll_offset: 0,
            dispatcher: CommandDispatcher::new(client, refresh.clone()),
            tasks: TaskScope::new(),
            events_tx,
            events_rx,
            refresh_rx: refresh.subscribe(),
        };

        info!("Chat view mounted");
        screen.conversation.initialize_greeting(FALLBACK_NAME);
        screen
            .dispatcher
            .spawn_identify(&mut screen.tasks, screen.events_tx.clone());
        screen.refresh_inbox();
        screen
    }

    /// Wait for the next background result or inbox refresh signal.
    pub async fn next_signal(&mut self) -> ChatSignal {
        tokio::select! {
            Some(event) = self.events_rx.recv() => ChatSignal::Event(event),
            Ok(_) | Err(RecvError::Lagged(_)) = self.refresh_rx.recv() => ChatSignal::InboxRefresh,
            else => std::future::pending().await,
        }
    }

    pub fn handle_signal(&mut self, signal: ChatSignal) -> Option<ChatNotice> {
        match signal {
            ChatSignal::Event(event) => self.handle_event(event),
            ChatSignal::InboxRefresh => {
                debug!("Inbox refresh signal received");
                self.refresh_inbox();
                None
            }
        }
    }

    fn handle_event(&mut self, event: ClientEvent) -> Option<ChatNotice> {
        match event {
            ClientEvent::IdentityResolved(identity) => {
                if self.conversation.regreet_if_untouched(identity.display_name()) {
                    debug!("Greeting updated for {}", identity.display_name());
                }
                self.inbox.apply_identity(&identity);
                self.identity = Some(identity);
                None
            }
            ClientEvent::CommandResolved { ticket, result } => {
                let completion = self.dispatcher.settle(&mut self.conversation, ticket, result);
                if completion.appended {
                    self.scroll_offset = 0;
                }
                // Without a session the backend fails with a plain server error
                let signed_out = completion.signed_out
                    || (completion.failed && self.is_known_anonymous());
                signed_out.then(|| {
                    ChatNotice::Notify(Notification::warning(
                        "Session expired, press Ctrl+L to sign in again",
                    ))
                })
            }
            ClientEvent::InboxLoaded { ticket, result } => {
                self.inbox.complete_fetch(ticket, result);
                None
            }
            ClientEvent::EmailDeleted { id, result } => {
                match self.inbox.complete_delete(&id, result) {
                    DeleteOutcome::Refetch => {
                        // Every inbox subscriber refetches, this view included
                        self.dispatcher.refresh_bus().publish();
                        Some(ChatNotice::Notify(Notification::success("Email deleted")))
                    }
                    DeleteOutcome::Failed(error) => Some(ChatNotice::ApiError {
                        context: "Could not delete email",
                        error,
                    }),
                }
            }
        }
    }

    /// Send whatever is in the input box. The text stays put when the submit
    /// is rejected.
    pub fn submit_input(&mut self) -> Result<(), SubmitRejected> {
        let ticket = self.conversation.begin_submit(&self.editor.text)?;
        self.editor.clear();
        self.scroll_offset = 0;
        self.dispatcher
            .spawn_command(&mut self.tasks, ticket, self.events_tx.clone());
        Ok(())
    }

    /// The follow-up Enter confirms while the conversation has focus
    pub fn open_action(&self) -> Option<OpenAction> {
        actions::open_action(&self.conversation)
    }

    /// The identity check answered and found nobody signed in
    pub fn is_known_anonymous(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|identity| !identity.is_authenticated())
    }

    /// Confirm the open action: one submit of the affirmative phrase.
    pub fn confirm_open_action(&mut self) -> Result<bool, SubmitRejected> {
        let Some(open) = self.open_action() else {
            return Ok(false);
        };
        let ticket = actions::resolve(&mut self.conversation, &open.action)?;
        info!("Confirming: {}", open.action.label());
        self.scroll_offset = 0;
        self.dispatcher
            .spawn_command(&mut self.tasks, ticket, self.events_tx.clone());
        Ok(true)
    }

    pub fn refresh_inbox(&mut self) {
        let ticket = self.inbox.begin_fetch();
        self.dispatcher
            .spawn_fetch(&mut self.tasks, ticket, self.events_tx.clone());
    }

    /// Delete the selected inbox email. Returns false when nothing is selected
    /// or a delete for it is already running.
    pub fn delete_selected_email(&mut self) -> bool {
        let Some(id) = self.inbox.selected_email().map(|email| email.id.clone()) else {
            return false;
        };
        if !self.inbox.begin_delete(&id) {
            return false;
        }
        self.dispatcher
            .spawn_delete(&mut self.tasks, id, self.events_tx.clone());
        true
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Requests this view still has running
    pub fn background_tasks(&self) -> usize {
        self.tasks.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmind_core::inbox::InboxView;
    use postmind_core::models::{
        AssistantReply, CorrelationId, DeleteConfirmation, EmailSummary, EntryContent, ReplyPreview,
    };
    use postmind_core::{ApiError, ClientConfig};

    fn offline_client() -> ApiClient {
        let config = ClientConfig {
            // Nothing listens here; requests fail fast with a transport error
            api_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = ChatFocus::Input;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, ChatFocus::Input);
        assert_eq!(ChatFocus::Input.prev(), ChatFocus::Inbox);
    }

    #[tokio::test]
    async fn test_mount_greets_with_fallback_and_loads_inbox() {
        let bus = RefreshBus::new();
        let screen = ChatScreen::mount(offline_client(), &bus);
        assert_eq!(screen.conversation.len(), 1);
        match &screen.conversation.entries()[0].content {
            EntryContent::Reply(postmind_core::models::AssistantReply::Text(text)) => {
                assert!(text.starts_with("Hi there 👋"));
            }
            other => panic!("unexpected greeting {:?}", other),
        }
        assert!(screen.inbox.is_loading());
    }

    #[tokio::test]
    async fn test_blank_input_is_not_sent() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        screen.editor.handle_paste("   ");
        assert_eq!(screen.submit_input(), Err(SubmitRejected::Empty));
        assert_eq!(screen.conversation.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_clears_input_and_rejects_second_send() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        screen.editor.handle_paste("show my emails");
        screen.submit_input().unwrap();
        assert!(screen.editor.is_empty());
        assert!(screen.conversation.is_pending());

        screen.editor.handle_paste("again");
        assert_eq!(screen.submit_input(), Err(SubmitRejected::Pending));
        assert_eq!(screen.editor.text, "again");
    }

    #[tokio::test]
    async fn test_refresh_bus_wakes_the_view() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        bus.publish();

        // Background results may arrive first; drain until the refresh shows up
        loop {
            match screen.next_signal().await {
                ChatSignal::InboxRefresh => break,
                ChatSignal::Event(event) => {
                    screen.handle_signal(ChatSignal::Event(event));
                }
            }
        }
    }

    fn resolve_command(screen: &mut ChatScreen, result: Result<AssistantReply, ApiError>) -> Option<ChatNotice> {
        let ticket = screen.conversation.begin_submit("show my emails").unwrap();
        screen.handle_signal(ChatSignal::Event(ClientEvent::CommandResolved { ticket, result }))
    }

    #[tokio::test]
    async fn test_server_error_without_session_suggests_sign_in() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        screen.handle_signal(ChatSignal::Event(ClientEvent::IdentityResolved(
            Identity::Anonymous,
        )));

        match resolve_command(&mut screen, Err(ApiError::Status(500))) {
            Some(ChatNotice::Notify(notification)) => {
                assert!(notification.message.contains("Ctrl+L"));
            }
            other => panic!("expected a sign-in hint, got {:?}", other),
        }

        let ticket = screen.inbox.begin_fetch();
        screen.handle_signal(ChatSignal::Event(ClientEvent::InboxLoaded {
            ticket,
            result: Err(ApiError::Status(500)),
        }));
        assert_eq!(screen.inbox.view(), InboxView::SignedOut);
    }

    #[tokio::test]
    async fn test_server_error_before_identity_is_just_a_failure() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        assert!(!screen.is_known_anonymous());
        assert!(resolve_command(&mut screen, Err(ApiError::Status(500))).is_none());
        assert_eq!(screen.conversation.len(), 3);
    }

    #[tokio::test]
    async fn test_successful_delete_publishes_inbox_refresh() {
        let bus = RefreshBus::new();
        let mut elsewhere = bus.subscribe();
        let mut screen = ChatScreen::mount(offline_client(), &bus);

        let notice = screen.handle_signal(ChatSignal::Event(ClientEvent::EmailDeleted {
            id: "1".to_string(),
            result: Ok(()),
        }));
        assert!(matches!(notice, Some(ChatNotice::Notify(_))));
        assert_eq!(elsewhere.try_recv().unwrap(), InboxRefresh);
    }

    #[tokio::test]
    async fn test_only_newest_action_is_confirmable() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        resolve_command(
            &mut screen,
            Ok(AssistantReply::ConfirmDelete(DeleteConfirmation {
                email: EmailSummary {
                    id: "9".to_string(),
                    subject: "Sale".to_string(),
                    from: "amazon".to_string(),
                    summary: String::new(),
                },
                correlation_id: CorrelationId::new("del-A"),
            })),
        );
        resolve_command(
            &mut screen,
            Ok(AssistantReply::ReplyPreview(ReplyPreview {
                original_subject: "Lunch?".to_string(),
                reply: "Sure.".to_string(),
                correlation_id: CorrelationId::new("rep-B"),
            })),
        );

        let open = screen.open_action().unwrap();
        assert_eq!(open.action.correlation_id(), &CorrelationId::new("rep-B"));
        assert_eq!(screen.confirm_open_action(), Ok(true));
        assert!(screen.conversation.is_pending());
    }

    #[tokio::test]
    async fn test_nothing_to_confirm_without_actions() {
        let bus = RefreshBus::new();
        let mut screen = ChatScreen::mount(offline_client(), &bus);
        assert!(screen.open_action().is_none());
        assert_eq!(screen.confirm_open_action(), Ok(false));
    }
}
