use serde::{Deserialize, Serialize};

use crate::{AsStr, user};

use super::{Action, Id};

/// One row of the chat list.
///
/// A chat row is keyed by its counterpart, so `id` shares the id space of
/// [`user::Id`]; `from_id` is whoever started the conversation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Chat {
    pub id: Id,
    pub from_id: user::Id,
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Chat {
    pub fn new(id: Id, from_id: user::Id, is_read: bool) -> Self {
        Self {
            id,
            from_id,
            is_read,
            name: None,
            body: None,
        }
    }

    pub fn with_read(&self, is_read: bool) -> Self {
        Self {
            is_read,
            ..self.clone()
        }
    }

    /// Whether `user` is this chat's counterpart or its originator.
    pub fn involves(&self, user: &user::Id) -> bool {
        self.id.as_str() == user.as_str() || self.from_id.eq(user)
    }

    pub const fn read_toggle(&self) -> Action {
        if self.is_read {
            Action::MarkUnread
        } else {
            Action::MarkRead
        }
    }
}
