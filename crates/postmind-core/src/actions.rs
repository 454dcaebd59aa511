//! Follow-up actions offered on assistant replies, and how they turn back
//! into commands.

use crate::api::CommandRequest;
use crate::conversation::{Conversation, SubmitTicket};
use crate::error::SubmitRejected;
use crate::models::{AssistantReply, CorrelationId};

/// Sent for every confirmation. The correlation id travels alongside it.
pub const AFFIRMATIVE: &str = "yes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    ConfirmReply(CorrelationId),
    ConfirmDelete(CorrelationId),
}

impl FollowUp {
    /// Actions available on a reply
    pub fn for_reply(reply: &AssistantReply) -> Option<Self> {
        match reply {
            AssistantReply::ReplyPreview(preview) => {
                Some(FollowUp::ConfirmReply(preview.correlation_id.clone()))
            }
            AssistantReply::ConfirmDelete(confirm) => {
                Some(FollowUp::ConfirmDelete(confirm.correlation_id.clone()))
            }
            AssistantReply::Text(_)
            | AssistantReply::Emails(_)
            | AssistantReply::Unrecognized { .. } => None,
        }
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        match self {
            FollowUp::ConfirmReply(id) | FollowUp::ConfirmDelete(id) => id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FollowUp::ConfirmReply(_) => "Send this reply",
            FollowUp::ConfirmDelete(_) => "Confirm delete",
        }
    }

    pub fn to_request(&self) -> CommandRequest {
        CommandRequest::confirmation(AFFIRMATIVE, self.correlation_id().clone())
    }
}

/// An action still open in the conversation, with the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAction {
    pub entry_index: usize,
    pub action: FollowUp,
}

/// Where a follow-up on a given entry stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Open,
    Confirmed,
    /// A later turn replaced it; the backend has dropped its staged action
    Superseded,
}

/// The single action that can still be confirmed.
///
/// The backend stages one action at a time and discards it on the next
/// message, so only a follow-up on the newest entry is live.
pub fn open_action(conversation: &Conversation) -> Option<OpenAction> {
    let entry_index = conversation.len().checked_sub(1)?;
    let entry = conversation.entries().get(entry_index)?;
    let action = FollowUp::for_reply(entry.reply()?)?;
    if conversation.is_confirmed(action.correlation_id()) {
        return None;
    }
    Some(OpenAction {
        entry_index,
        action,
    })
}

pub fn action_state(conversation: &Conversation, entry_index: usize, action: &FollowUp) -> ActionState {
    if conversation.is_confirmed(action.correlation_id()) {
        return ActionState::Confirmed;
    }
    match open_action(conversation) {
        Some(open) if open.entry_index == entry_index && &open.action == action => {
            ActionState::Open
        }
        _ => ActionState::Superseded,
    }
}

/// Turn a tap on `action` into exactly one submit of the affirmative phrase.
/// Only the open action may be confirmed.
pub fn resolve(
    conversation: &mut Conversation,
    action: &FollowUp,
) -> Result<SubmitTicket, SubmitRejected> {
    if conversation.is_confirmed(action.correlation_id()) {
        return Err(SubmitRejected::AlreadyConfirmed);
    }
    if conversation.is_pending() {
        return Err(SubmitRejected::Pending);
    }
    match open_action(conversation) {
        Some(open) if &open.action == action => conversation.begin_request(action.to_request()),
        _ => Err(SubmitRejected::Superseded),
    }
}
