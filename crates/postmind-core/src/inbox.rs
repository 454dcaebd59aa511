//! Inbox panel state: the latest email list snapshot plus selection.
//!
//! Fetches are numbered; only the most recently started one may replace the
//! snapshot, so an older response that arrives late is discarded.
//!
//! The backend answers a missing Gmail session with a plain server error, so
//! once the identity check reports nobody signed in, any failed fetch is shown
//! as the signed-out state.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::EmailSummary;
use crate::session::Identity;

/// Placeholder cards shown while a fetch is in flight
pub const SKELETON_ROWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxStatus {
    Loading,
    Ready,
    SignedOut,
    Failed(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// What to do after a delete request settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Refetch,
    Failed(ApiError),
}

/// One card in the rendered list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxCard<'a> {
    /// 1-based, the number the assistant understands ("reply to email 2")
    pub number: usize,
    pub email: &'a EmailSummary,
    pub selected: bool,
    pub deleting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxView<'a> {
    Skeleton(usize),
    Empty,
    SignedOut,
    Failed(&'a ApiError),
    Cards(Vec<InboxCard<'a>>),
}

#[derive(Debug)]
pub struct InboxPanel {
    emails: Vec<EmailSummary>,
    status: InboxStatus,
    generation: u64,
    selected: usize,
    deleting: HashSet<String>,
    /// Set once the identity check found nobody signed in
    anonymous: bool,
}

impl Default for InboxPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InboxPanel {
    pub fn new() -> Self {
        Self {
            emails: Vec::new(),
            status: InboxStatus::Loading,
            generation: 0,
            selected: 0,
            deleting: HashSet::new(),
            anonymous: false,
        }
    }

    pub fn emails(&self) -> &[EmailSummary] {
        &self.emails
    }

    pub fn status(&self) -> &InboxStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == InboxStatus::Loading
    }

    /// Record the resolved session. A fetch that already failed for an
    /// anonymous user turns into the signed-out state.
    pub fn apply_identity(&mut self, identity: &Identity) {
        self.anonymous = !identity.is_authenticated();
        if self.anonymous && matches!(self.status, InboxStatus::Failed(_)) {
            debug!("Inbox fetch failed without a session, showing signed out");
            self.status = InboxStatus::SignedOut;
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.status = InboxStatus::Loading;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Replace the snapshot wholesale. Returns false for a superseded ticket.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<EmailSummary>, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match result {
            Ok(emails) => {
                info!("Inbox loaded with {} emails", emails.len());
                self.emails = emails;
                self.status = InboxStatus::Ready;
            }
            Err(e) if e.is_unauthenticated() || self.anonymous => {
                debug!("Inbox fetch failed while signed out: {}", e);
                self.emails.clear();
                self.status = InboxStatus::SignedOut;
            }
            Err(e) => {
                warn!("Inbox fetch failed: {}", e);
                self.emails.clear();
                self.status = InboxStatus::Failed(e);
            }
        }
        self.deleting.retain(|id| self.emails.iter().any(|email| &email.id == id));
        self.clamp_selection();
        true
    }

    /// Mark `id` as being deleted. Returns false when a delete for it is
    /// already in flight.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        self.deleting.insert(id.to_string())
    }

    /// A successful delete always refetches; the snapshot is never patched
    /// locally. A failed one is reported and leaves the snapshot alone.
    pub fn complete_delete(&mut self, id: &str, result: Result<(), ApiError>) -> DeleteOutcome {
        self.deleting.remove(id);
        match result {
            Ok(()) => DeleteOutcome::Refetch,
            Err(e) => {
                warn!("Deleting email {} failed: {}", id, e);
                DeleteOutcome::Failed(e)
            }
        }
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_email(&self) -> Option<&EmailSummary> {
        if self.status != InboxStatus::Ready {
            return None;
        }
        self.emails.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.emails.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.emails.len().saturating_sub(1));
    }

    pub fn view(&self) -> InboxView<'_> {
        match &self.status {
            InboxStatus::Loading => InboxView::Skeleton(SKELETON_ROWS),
            InboxStatus::SignedOut => InboxView::SignedOut,
            InboxStatus::Failed(e) => InboxView::Failed(e),
            InboxStatus::Ready if self.emails.is_empty() => InboxView::Empty,
            InboxStatus::Ready => InboxView::Cards(
                self.emails
                    .iter()
                    .enumerate()
                    .map(|(i, email)| InboxCard {
                        number: i + 1,
                        email,
                        selected: i == self.selected,
                        deleting: self.deleting.contains(&email.id),
                    })
                    .collect(),
            ),
        }
    }

    /// Fetch and apply in one step.
    pub async fn refresh(&mut self, client: &ApiClient) {
        let ticket = self.begin_fetch();
        let result = client.list_emails().await;
        self.complete_fetch(ticket, result);
    }

    /// Delete `id`, then refetch when the backend accepted it.
    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> Result<(), ApiError> {
        self.begin_delete(id);
        let result = client.delete_email(id).await;
        match self.complete_delete(id, result) {
            DeleteOutcome::Refetch => {
                self.refresh(client).await;
                Ok(())
            }
            DeleteOutcome::Failed(e) => Err(e),
        }
    }
}
