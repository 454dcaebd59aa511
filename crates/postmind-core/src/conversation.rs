//! In-memory message store for one mounted chat view.
//!
//! A submit is split in two so the request can run on another task:
//! [`Conversation::begin_submit`] appends the user's turn and takes the pending
//! slot, [`Conversation::complete`] appends whatever came back and releases it.
//! The [`SubmitTicket`] returned by the first half must be handed to the second.

use std::collections::HashSet;

use tracing::debug;

use crate::api::CommandRequest;
use crate::error::{ApiError, SubmitRejected};
use crate::models::{AssistantReply, ChatEntry, CorrelationId};

pub fn greeting(name: &str) -> String {
    format!(
        "Hi {name} 👋 I'm your AI Gmail assistant.\n\n\
         You can say:\n\
         • show my emails\n\
         • reply to email 1\n\
         • delete email from <sender>"
    )
}

/// Proof that a submit is in flight. Carries the epoch of the sequence it was
/// started against so a reset makes it stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    epoch: u64,
    request: CommandRequest,
}

impl SubmitTicket {
    pub fn request(&self) -> &CommandRequest {
        &self.request
    }
}

/// What a completion changed, for the caller to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    /// False when the ticket was stale and nothing was touched
    pub appended: bool,
    /// The backend reported a deletion; the inbox should refetch
    pub refresh_inbox: bool,
    /// The request failed and a failure entry was appended
    pub failed: bool,
    pub signed_out: bool,
}

#[derive(Debug, Default)]
pub struct Conversation {
    entries: Vec<ChatEntry>,
    pending: bool,
    epoch: u64,
    confirmed: HashSet<CorrelationId>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a single greeting entry. Anything still in flight belongs to
    /// the old sequence and will be dropped when it completes.
    pub fn initialize_greeting(&mut self, name: &str) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = false;
        self.confirmed.clear();
        self.entries.clear();
        self.entries.push(ChatEntry::assistant_text(greeting(name)));
    }

    /// Re-greet with `name` if nothing has happened since the last reset.
    /// Once the user has sent something the greeting stays as it was.
    pub fn regreet_if_untouched(&mut self, name: &str) -> bool {
        if self.pending || self.entries.len() > 1 {
            return false;
        }
        self.initialize_greeting(name);
        true
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_confirmed(&self, id: &CorrelationId) -> bool {
        self.confirmed.contains(id)
    }

    /// First half of a free-text submit. Rejected without side effects while
    /// another submit is pending or when `text` is blank.
    pub fn begin_submit(&mut self, text: &str) -> Result<SubmitTicket, SubmitRejected> {
        if text.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        self.begin_request(CommandRequest::text(text))
    }

    pub(crate) fn begin_request(
        &mut self,
        request: CommandRequest,
    ) -> Result<SubmitTicket, SubmitRejected> {
        if self.pending {
            return Err(SubmitRejected::Pending);
        }
        self.pending = true;
        self.entries.push(ChatEntry::user(request.message.clone()));
        Ok(SubmitTicket {
            epoch: self.epoch,
            request,
        })
    }

    /// Second half of a submit: append the reply, or a failure entry, and
    /// release the pending slot.
    pub fn complete(
        &mut self,
        ticket: SubmitTicket,
        result: Result<AssistantReply, ApiError>,
    ) -> Completion {
        if ticket.epoch != self.epoch {
            debug!("Dropping reply for a reset conversation");
            return Completion::default();
        }
        self.pending = false;

        match result {
            Ok(reply) => {
                if let Some(id) = ticket.request.correlation_id {
                    self.confirmed.insert(id);
                }
                let refresh_inbox = reply.is_deletion_notice();
                self.entries.push(ChatEntry::assistant(reply));
                Completion {
                    appended: true,
                    refresh_inbox,
                    failed: false,
                    signed_out: false,
                }
            }
            Err(error) => {
                let signed_out = error.is_unauthenticated();
                self.entries.push(ChatEntry::failure(error));
                Completion {
                    appended: true,
                    refresh_inbox: false,
                    failed: true,
                    signed_out,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailSummary, EntryContent, Role};

    fn greeted() -> Conversation {
        let mut conversation = Conversation::new();
        conversation.initialize_greeting("there");
        conversation
    }

    #[test]
    fn test_greeting_interpolates_name() {
        let mut conversation = Conversation::new();
        conversation.initialize_greeting("Ana");
        assert_eq!(conversation.len(), 1);
        match &conversation.entries()[0].content {
            EntryContent::Reply(AssistantReply::Text(text)) => {
                assert!(text.starts_with("Hi Ana 👋 I'm your AI Gmail assistant."));
                assert!(text.contains("• show my emails"));
                assert!(text.contains("• delete email from <sender>"));
            }
            other => panic!("expected greeting text, got {:?}", other),
        }
    }

    #[test]
    fn test_reinitialize_resets_sequence() {
        let mut conversation = greeted();
        let ticket = conversation.begin_submit("show my emails").unwrap();
        conversation.complete(ticket, Ok(AssistantReply::Text("ok".to_string())));
        assert_eq!(conversation.len(), 3);

        conversation.initialize_greeting("Ana");
        assert_eq!(conversation.len(), 1);
        assert!(!conversation.is_pending());
    }

    #[test]
    fn test_regreet_only_before_first_submit() {
        let mut conversation = greeted();
        assert!(conversation.regreet_if_untouched("Ana"));
        assert_eq!(
            conversation.entries()[0].content,
            EntryContent::Reply(AssistantReply::Text(greeting("Ana")))
        );

        let _ticket = conversation.begin_submit("show my emails").unwrap();
        assert!(!conversation.regreet_if_untouched("Bob"));
        assert_eq!(conversation.len(), 2);
        assert!(conversation.is_pending());
    }

    #[test]
    fn test_each_round_trip_appends_two_entries_in_order() {
        let mut conversation = greeted();
        for (i, command) in ["show my emails", "reply to email 2", "help"].iter().enumerate() {
            let before = conversation.len();
            let ticket = conversation.begin_submit(command).unwrap();
            assert!(conversation.is_pending());
            conversation.complete(ticket, Ok(AssistantReply::Text(format!("reply {i}"))));
            assert!(!conversation.is_pending());
            assert_eq!(conversation.len(), before + 2);

            let entries = conversation.entries();
            assert_eq!(entries[before].role(), Role::User);
            assert_eq!(entries[before].content, EntryContent::User(command.to_string()));
            assert_eq!(entries[before + 1].role(), Role::Assistant);
        }
    }

    #[test]
    fn test_submit_while_pending_is_rejected_without_effects() {
        let mut conversation = greeted();
        let _ticket = conversation.begin_submit("show my emails").unwrap();
        let len = conversation.len();

        assert_eq!(
            conversation.begin_submit("again"),
            Err(SubmitRejected::Pending)
        );
        assert_eq!(conversation.len(), len);
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut conversation = greeted();
        assert_eq!(conversation.begin_submit("   "), Err(SubmitRejected::Empty));
        assert_eq!(conversation.len(), 1);
        assert!(!conversation.is_pending());
    }

    #[test]
    fn test_failure_appends_error_entry_and_releases_pending() {
        let mut conversation = greeted();
        let ticket = conversation.begin_submit("show my emails").unwrap();
        let completion = conversation.complete(ticket, Err(ApiError::Timeout));

        assert!(completion.appended);
        assert!(!completion.signed_out);
        assert!(!conversation.is_pending());
        assert_eq!(
            conversation.entries().last().unwrap().content,
            EntryContent::Failure(ApiError::Timeout)
        );
    }

    #[test]
    fn test_unauthenticated_failure_is_flagged() {
        let mut conversation = greeted();
        let ticket = conversation.begin_submit("show my emails").unwrap();
        let completion = conversation.complete(ticket, Err(ApiError::Unauthenticated));
        assert!(completion.signed_out);
    }

    #[test]
    fn test_deletion_notice_requests_refresh() {
        let mut conversation = greeted();
        let ticket = conversation.begin_submit("yes").unwrap();
        let completion = conversation.complete(
            ticket,
            Ok(AssistantReply::Text("Email deleted successfully.".to_string())),
        );
        assert!(completion.refresh_inbox);

        let ticket = conversation.begin_submit("show my emails").unwrap();
        let completion = conversation.complete(
            ticket,
            Ok(AssistantReply::Emails(vec![EmailSummary {
                id: "1".to_string(),
                subject: "deleted items".to_string(),
                from: "F".to_string(),
                summary: String::new(),
            }])),
        );
        assert!(!completion.refresh_inbox);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut conversation = greeted();
        let stale = conversation.begin_submit("show my emails").unwrap();
        conversation.initialize_greeting("Ana");

        let completion = conversation.complete(stale, Ok(AssistantReply::Text("late".to_string())));
        assert_eq!(completion, Completion::default());
        assert_eq!(conversation.len(), 1);
    }
}
