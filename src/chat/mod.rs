use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::serde_helpers::string_or_number;
use crate::{AsStr, api};

pub mod markup;
pub mod model;
pub mod service;

pub use model::Chat;
pub use service::ChatActionMenu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct Id(#[serde(with = "string_or_number")] pub String);

impl AsStr for Id {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Entries of the per-chat overflow menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MarkRead,
    MarkUnread,
    Archive,
    Delete,
}

impl Action {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MarkRead => "Mark as Read",
            Self::MarkUnread => "Mark as Unread",
            Self::Archive => "Archive Chat",
            Self::Delete => "Delete Chat",
        }
    }

    pub const fn icon(&self) -> &'static str {
        match self {
            Self::MarkRead | Self::MarkUnread => "fa-solid fa-check",
            Self::Archive => "fa-solid fa-box-archive",
            Self::Delete => "fa-solid fa-xmark",
        }
    }

    /// In-flight slot. Read and unread share one so opposite toggles cannot race.
    const fn bit(&self) -> u8 {
        match self {
            Self::MarkRead | Self::MarkUnread => 1,
            Self::Archive => 1 << 1,
            Self::Delete => 1 << 2,
        }
    }
}

impl AsStr for Action {
    fn as_str(&self) -> &str {
        match self {
            Self::MarkRead => "mark_read",
            Self::MarkUnread => "mark_unread",
            Self::Archive => "archive",
            Self::Delete => "delete",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("read state of this chat can not be changed by the current user")]
    NotPermitted,
    #[error("{0:?} is already in flight")]
    InFlight(Action),
    #[error("chat menu is disposed")]
    Disposed,

    #[error(transparent)]
    _Api(#[from] api::Error),
}
