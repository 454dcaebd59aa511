use tokio::sync::broadcast;
use tracing::debug;

use crate::conversation::SubmitTicket;
use crate::error::ApiError;
use crate::inbox::FetchTicket;
use crate::models::{AssistantReply, EmailSummary};
use crate::session::Identity;

/// Results of background requests, delivered back to the task that owns the UI state
#[derive(Debug)]
pub enum ClientEvent {
    IdentityResolved(Identity),
    CommandResolved {
        ticket: SubmitTicket,
        result: Result<AssistantReply, ApiError>,
    },
    InboxLoaded {
        ticket: FetchTicket,
        result: Result<Vec<EmailSummary>, ApiError>,
    },
    EmailDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

/// "The inbox changed, refetch it." No payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboxRefresh;

const REFRESH_CAPACITY: usize = 16;

/// Typed broadcast topic for inbox refreshes. Owned by the app and handed to
/// the dispatcher (publisher) and inbox panel (subscriber).
#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<InboxRefresh>,
}

impl RefreshBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(REFRESH_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self) {
        if self.tx.send(InboxRefresh).is_err() {
            debug!("Inbox refresh published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InboxRefresh> {
        self.tx.subscribe()
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}
