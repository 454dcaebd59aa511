pub mod email;
pub mod entry;
pub mod reply;

pub use email::EmailSummary;
pub use entry::{ChatEntry, EntryContent, Role};
pub use reply::{AssistantReply, CorrelationId, DeleteConfirmation, ReplyPreview, WireReply};
