use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user;

use super::Id;

/// A sent message as returned by the server.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub id: Id,
    #[serde(alias = "from_id")]
    pub user: user::Id,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(id: Id, user: user::Id, body: impl Into<String>) -> Self {
        Self {
            id,
            user,
            body: body.into(),
            created_at: None,
        }
    }
}
