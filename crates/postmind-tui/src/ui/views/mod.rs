pub mod chat;
pub mod inbox;
pub mod landing;
pub mod login;

pub use chat::render_chat;
pub use inbox::render_inbox;
pub use landing::render_landing;
pub use login::render_login;
