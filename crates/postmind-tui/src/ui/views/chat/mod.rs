pub(crate) mod cards;
mod input;
pub(crate) mod layout;
mod messages;

pub use layout::render_chat;
