pub mod api;
pub mod chat;
pub mod composer;
pub mod disclosure;
pub mod integration;
pub mod lifecycle;
pub mod message;
pub mod modal;
pub mod serde_helpers;
pub mod session;
pub mod store;
pub mod user;

pub trait AsStr {
    fn as_str(&self) -> &str;
}
