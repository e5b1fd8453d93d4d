use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::AsStr;
use crate::serde_helpers::string_or_number;

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
