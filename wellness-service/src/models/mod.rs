pub mod bucket;
pub mod cache;
pub mod chat;

pub use cache::CachedResponse;
pub use chat::{ChatMessage, ChatRole};
