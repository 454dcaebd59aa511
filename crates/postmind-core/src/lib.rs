pub mod actions;
pub mod api;
pub mod config;
pub mod conversation;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod inbox;
pub mod models;
pub mod render;
pub mod session;
pub mod tasks;
pub mod tracing_setup;

pub use api::{ApiClient, CommandRequest};
pub use config::{ClientConfig, ConfigOverrides};
pub use conversation::{Completion, Conversation, SubmitTicket};
pub use dispatcher::CommandDispatcher;
pub use error::{ApiError, SubmitRejected};
pub use events::{ClientEvent, InboxRefresh, RefreshBus};
pub use inbox::{InboxPanel, InboxStatus};
pub use session::Identity;
pub use tasks::TaskScope;
pub use tracing_setup::init_tracing;
