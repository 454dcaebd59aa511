use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::EmailSummary;

pub const KIND_TEXT: &str = "text";
pub const KIND_EMAILS: &str = "emails";
pub const KIND_REPLY_PREVIEW: &str = "reply_preview";
pub const KIND_CONFIRM_DELETE: &str = "confirm_delete";

/// Opaque token tying a confirmation back to the payload it confirms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Used when the backend did not send one of its own.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPreview {
    pub original_subject: String,
    pub reply: String,
    pub correlation_id: CorrelationId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub email: EmailSummary,
    pub correlation_id: CorrelationId,
}

/// Structured reply from the command endpoint, one variant per declared `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    Text(String),
    Emails(Vec<EmailSummary>),
    ReplyPreview(ReplyPreview),
    ConfirmDelete(DeleteConfirmation),
    /// A `type` this client does not know. Kept so the turn still exists in
    /// the history, but it renders nothing.
    Unrecognized { kind: String },
}

/// Raw command response as it comes off the wire.
///
/// Payload fields usually live under `data`, but some backend builds spread
/// them at the top level instead; those land in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReply {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct ReplyPreviewFields {
    original_subject: String,
    reply: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmailsPayload {
    List(Vec<EmailSummary>),
    Wrapped { emails: Vec<EmailSummary> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeletePayload {
    Wrapped { email: EmailSummary },
    Bare(EmailSummary),
}

fn decode<T: DeserializeOwned>(kind: &str, payload: Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|err| ApiError::Malformed(format!("{kind}: {err}")))
}

impl AssistantReply {
    pub fn from_wire(wire: WireReply) -> Result<Self, ApiError> {
        let WireReply {
            kind,
            data,
            correlation_id,
            extra,
        } = wire;
        let payload = data.unwrap_or(Value::Object(extra));
        let correlation_id = correlation_id
            .filter(|id| !id.is_empty())
            .map(CorrelationId::new);

        match kind.as_str() {
            KIND_TEXT => match payload {
                Value::String(text) => Ok(AssistantReply::Text(text)),
                Value::Object(mut fields) => match fields.remove("content") {
                    Some(Value::String(text)) => Ok(AssistantReply::Text(text)),
                    _ => Err(ApiError::Malformed(format!("{kind}: expected a string"))),
                },
                _ => Err(ApiError::Malformed(format!("{kind}: expected a string"))),
            },
            KIND_EMAILS => {
                let emails = match decode::<EmailsPayload>(&kind, payload)? {
                    EmailsPayload::List(emails) | EmailsPayload::Wrapped { emails } => emails,
                };
                Ok(AssistantReply::Emails(emails))
            }
            KIND_REPLY_PREVIEW => {
                let fields: ReplyPreviewFields = decode(&kind, payload)?;
                Ok(AssistantReply::ReplyPreview(ReplyPreview {
                    original_subject: fields.original_subject,
                    reply: fields.reply,
                    correlation_id: correlation_id.unwrap_or_else(CorrelationId::generate),
                }))
            }
            KIND_CONFIRM_DELETE => {
                let email = match decode::<DeletePayload>(&kind, payload)? {
                    DeletePayload::Wrapped { email } | DeletePayload::Bare(email) => email,
                };
                Ok(AssistantReply::ConfirmDelete(DeleteConfirmation {
                    email,
                    correlation_id: correlation_id.unwrap_or_else(CorrelationId::generate),
                }))
            }
            _ => Ok(AssistantReply::Unrecognized { kind }),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            AssistantReply::Text(_) => KIND_TEXT,
            AssistantReply::Emails(_) => KIND_EMAILS,
            AssistantReply::ReplyPreview(_) => KIND_REPLY_PREVIEW,
            AssistantReply::ConfirmDelete(_) => KIND_CONFIRM_DELETE,
            AssistantReply::Unrecognized { kind } => kind,
        }
    }

    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        match self {
            AssistantReply::ReplyPreview(preview) => Some(&preview.correlation_id),
            AssistantReply::ConfirmDelete(confirm) => Some(&confirm.correlation_id),
            _ => None,
        }
    }

    /// The backend reports a completed deletion as plain text; the inbox
    /// needs a refetch when it does.
    pub fn is_deletion_notice(&self) -> bool {
        match self {
            AssistantReply::Text(text) => text.to_lowercase().contains("deleted"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<AssistantReply, ApiError> {
        let wire: WireReply = serde_json::from_str(json).unwrap();
        AssistantReply::from_wire(wire)
    }

    #[test]
    fn test_text_reply() {
        let reply = parse(r#"{"type": "text", "data": "Command not understood."}"#).unwrap();
        assert_eq!(reply, AssistantReply::Text("Command not understood.".to_string()));
        assert_eq!(reply.kind(), "text");
        assert!(reply.correlation_id().is_none());
    }

    #[test]
    fn test_text_reply_with_spread_content() {
        let reply = parse(r#"{"type": "text", "content": "hello"}"#).unwrap();
        assert_eq!(reply, AssistantReply::Text("hello".to_string()));
    }

    #[test]
    fn test_text_reply_rejects_non_string() {
        let err = parse(r#"{"type": "text", "data": 42}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_emails_reply_as_list_or_wrapped() {
        let list = parse(
            r#"{"type": "emails", "data": [{"id": "1", "subject": "S", "from": "F", "summary": "Sum"}]}"#,
        )
        .unwrap();
        let wrapped = parse(
            r#"{"type": "emails", "emails": [{"id": "1", "subject": "S", "from": "F", "summary": "Sum"}]}"#,
        )
        .unwrap();
        assert_eq!(list, wrapped);
        match list {
            AssistantReply::Emails(emails) => {
                assert_eq!(emails.len(), 1);
                assert_eq!(emails[0].subject, "S");
            }
            other => panic!("expected emails, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_preview_keeps_backend_correlation_id() {
        let reply = parse(
            r#"{"type": "reply_preview", "correlation_id": "abc-1",
                "data": {"original_subject": "Lunch?", "reply": "Sure, noon works."}}"#,
        )
        .unwrap();
        match &reply {
            AssistantReply::ReplyPreview(preview) => {
                assert_eq!(preview.original_subject, "Lunch?");
                assert_eq!(preview.reply, "Sure, noon works.");
                assert_eq!(preview.correlation_id.as_str(), "abc-1");
            }
            other => panic!("expected reply preview, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_preview_generates_correlation_id_when_missing() {
        let reply = parse(
            r#"{"type": "reply_preview", "original_subject": "Lunch?", "reply": "Sure."}"#,
        )
        .unwrap();
        let id = reply.correlation_id().unwrap();
        assert!(!id.as_str().is_empty());
    }

    #[test]
    fn test_reply_preview_missing_fields_is_malformed() {
        let err = parse(r#"{"type": "reply_preview", "data": {"reply": "x"}}"#).unwrap_err();
        match err {
            ApiError::Malformed(msg) => assert!(msg.starts_with("reply_preview")),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_confirm_delete_wrapped_and_bare() {
        let wrapped = parse(
            r#"{"type": "confirm_delete", "data": {"email": {"id": "9", "subject": "Sale", "from": "amazon"}}}"#,
        )
        .unwrap();
        let bare = parse(
            r#"{"type": "confirm_delete", "data": {"id": "9", "subject": "Sale", "from": "amazon"}}"#,
        )
        .unwrap();
        for reply in [wrapped, bare] {
            match reply {
                AssistantReply::ConfirmDelete(confirm) => {
                    assert_eq!(confirm.email.id, "9");
                    assert_eq!(confirm.email.from, "amazon");
                }
                other => panic!("expected confirm_delete, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_kind_is_kept_not_rejected() {
        let reply = parse(r#"{"type": "calendar", "data": {"when": "now"}}"#).unwrap();
        assert_eq!(
            reply,
            AssistantReply::Unrecognized {
                kind: "calendar".to_string()
            }
        );
        assert_eq!(reply.kind(), "calendar");
    }

    #[test]
    fn test_deletion_notice_detection() {
        assert!(AssistantReply::Text("Email deleted successfully.".to_string()).is_deletion_notice());
        assert!(AssistantReply::Text("DELETED".to_string()).is_deletion_notice());
        assert!(!AssistantReply::Text("Reply sent successfully.".to_string()).is_deletion_notice());
        assert!(!AssistantReply::Emails(vec![]).is_deletion_notice());
    }
}
