use chrono::{DateTime, Local};

use crate::error::ApiError;
use crate::models::AssistantReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// What the user typed, verbatim
    User(String),
    Reply(AssistantReply),
    /// A request that never produced a reply
    Failure(ApiError),
}

/// One turn in the conversation. `time` is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub content: EntryContent,
    pub time: DateTime<Local>,
}

impl ChatEntry {
    fn now(content: EntryContent) -> Self {
        Self {
            content,
            time: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::now(EntryContent::User(text.into()))
    }

    pub fn assistant(reply: AssistantReply) -> Self {
        Self::now(EntryContent::Reply(reply))
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::assistant(AssistantReply::Text(text.into()))
    }

    pub fn failure(error: ApiError) -> Self {
        Self::now(EntryContent::Failure(error))
    }

    pub fn role(&self) -> Role {
        match self.content {
            EntryContent::User(_) => Role::User,
            EntryContent::Reply(_) | EntryContent::Failure(_) => Role::Assistant,
        }
    }

    pub fn reply(&self) -> Option<&AssistantReply> {
        match &self.content {
            EntryContent::Reply(reply) => Some(reply),
            _ => None,
        }
    }

    /// Display time, e.g. "14:03:22"
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_follows_content() {
        assert_eq!(ChatEntry::user("show my emails").role(), Role::User);
        assert_eq!(ChatEntry::assistant_text("hi").role(), Role::Assistant);
        assert_eq!(ChatEntry::failure(ApiError::Timeout).role(), Role::Assistant);
    }

    #[test]
    fn test_reply_accessor() {
        let entry = ChatEntry::assistant_text("hi");
        assert_eq!(entry.reply(), Some(&AssistantReply::Text("hi".to_string())));
        assert!(ChatEntry::user("hi").reply().is_none());
    }

    #[test]
    fn test_time_label_format() {
        let label = ChatEntry::user("x").time_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
