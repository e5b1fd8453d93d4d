use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::Chat;
use crate::message::Message;
use crate::user;

pub mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::HttpChatApi;

pub type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn ChatApi + Send + Sync>;

/// Remote operations the chat widgets depend on.
#[async_trait]
pub trait ChatApi {
    async fn send_message(&self, sender: &user::Id, body: &str) -> Result<Message>;

    async fn mark_read(&self, chat: &Chat) -> Result<()>;

    async fn mark_unread(&self, chat: &Chat) -> Result<()>;

    async fn archive(&self, chat: &Chat) -> Result<()>;
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("network error, try again")]
    Network,
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("chat not found")]
    NotFound,
    #[error("not allowed")]
    Permission,
    #[error("unexpected api error: {0}")]
    Unexpected(String),

    #[error(transparent)]
    _Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    _Url(#[from] url::ParseError),
}

impl Error {
    /// Whether re-issuing the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network => true,
            Self::_Reqwest(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
