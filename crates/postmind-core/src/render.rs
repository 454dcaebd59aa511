//! Turns chat entries into display blocks. Front ends draw the blocks; they
//! never look at reply payloads directly.

use crate::actions::FollowUp;
use crate::models::{AssistantReply, ChatEntry, EntryContent};

pub const NO_EMAILS_NOTICE: &str = "No emails found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBlock {
    Text(String),
    EmailCard {
        subject: String,
        from: String,
        summary: String,
    },
    ReplyDraft {
        original_subject: String,
        reply: String,
    },
    DeleteTarget {
        subject: String,
        from: String,
    },
    Notice(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryView {
    pub blocks: Vec<ViewBlock>,
    pub actions: Vec<FollowUp>,
}

impl EntryView {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.actions.is_empty()
    }
}

pub fn render_entry(entry: &ChatEntry) -> EntryView {
    match &entry.content {
        EntryContent::User(text) => EntryView {
            blocks: vec![ViewBlock::Text(text.clone())],
            actions: Vec::new(),
        },
        EntryContent::Reply(reply) => render_reply(reply),
        EntryContent::Failure(error) => EntryView {
            blocks: vec![ViewBlock::Error(error.to_string())],
            actions: Vec::new(),
        },
    }
}

pub fn render_reply(reply: &AssistantReply) -> EntryView {
    let blocks = match reply {
        AssistantReply::Text(text) => vec![ViewBlock::Text(text.clone())],
        AssistantReply::Emails(emails) if emails.is_empty() => {
            vec![ViewBlock::Notice(NO_EMAILS_NOTICE.to_string())]
        }
        AssistantReply::Emails(emails) => emails
            .iter()
            .map(|email| ViewBlock::EmailCard {
                subject: email.subject.clone(),
                from: email.from.clone(),
                summary: email.summary.clone(),
            })
            .collect(),
        AssistantReply::ReplyPreview(preview) => vec![ViewBlock::ReplyDraft {
            original_subject: preview.original_subject.clone(),
            reply: preview.reply.clone(),
        }],
        AssistantReply::ConfirmDelete(confirm) => vec![ViewBlock::DeleteTarget {
            subject: confirm.email.subject.clone(),
            from: confirm.email.from.clone(),
        }],
        AssistantReply::Unrecognized { .. } => Vec::new(),
    };

    EntryView {
        blocks,
        actions: FollowUp::for_reply(reply).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{CorrelationId, DeleteConfirmation, EmailSummary, ReplyPreview};

    fn email(subject: &str, from: &str) -> EmailSummary {
        EmailSummary {
            id: "1".to_string(),
            subject: subject.to_string(),
            from: from.to_string(),
            summary: "short".to_string(),
        }
    }

    #[test]
    fn test_every_reply_kind_renders() {
        let replies = vec![
            AssistantReply::Text("hi".to_string()),
            AssistantReply::Emails(vec![email("S", "F")]),
            AssistantReply::Emails(vec![]),
            AssistantReply::ReplyPreview(ReplyPreview {
                original_subject: "Lunch?".to_string(),
                reply: "Sure".to_string(),
                correlation_id: CorrelationId::new("r"),
            }),
            AssistantReply::ConfirmDelete(DeleteConfirmation {
                email: email("Sale", "amazon"),
                correlation_id: CorrelationId::new("d"),
            }),
            AssistantReply::Unrecognized {
                kind: "chart".to_string(),
            },
        ];

        for reply in &replies {
            let view = render_reply(reply);
            match reply {
                AssistantReply::Unrecognized { .. } => assert!(view.is_empty()),
                _ => assert!(!view.blocks.is_empty(), "{} rendered nothing", reply.kind()),
            }
        }
    }

    #[test]
    fn test_empty_email_list_is_a_notice() {
        let view = render_reply(&AssistantReply::Emails(vec![]));
        assert_eq!(
            view.blocks,
            vec![ViewBlock::Notice("No emails found.".to_string())]
        );
    }

    #[test]
    fn test_one_card_per_email_in_order() {
        let view = render_reply(&AssistantReply::Emails(vec![
            email("First", "a"),
            email("Second", "b"),
        ]));
        let subjects: Vec<&str> = view
            .blocks
            .iter()
            .map(|block| match block {
                ViewBlock::EmailCard { subject, .. } => subject.as_str(),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(subjects, vec!["First", "Second"]);
    }

    #[test]
    fn test_confirmable_replies_carry_one_action() {
        let preview = render_reply(&AssistantReply::ReplyPreview(ReplyPreview {
            original_subject: "Lunch?".to_string(),
            reply: "Sure".to_string(),
            correlation_id: CorrelationId::new("r"),
        }));
        assert_eq!(
            preview.actions,
            vec![FollowUp::ConfirmReply(CorrelationId::new("r"))]
        );

        let delete = render_reply(&AssistantReply::ConfirmDelete(DeleteConfirmation {
            email: email("Sale", "amazon"),
            correlation_id: CorrelationId::new("d"),
        }));
        assert_eq!(
            delete.blocks,
            vec![ViewBlock::DeleteTarget {
                subject: "Sale".to_string(),
                from: "amazon".to_string(),
            }]
        );
        assert_eq!(delete.actions.len(), 1);
    }

    #[test]
    fn test_user_and_failure_entries() {
        let user = render_entry(&ChatEntry::user("show my emails"));
        assert_eq!(user.blocks, vec![ViewBlock::Text("show my emails".to_string())]);

        let failure = render_entry(&ChatEntry::failure(ApiError::Timeout));
        assert_eq!(
            failure.blocks,
            vec![ViewBlock::Error("The server took too long to respond".to_string())]
        );
    }
}
