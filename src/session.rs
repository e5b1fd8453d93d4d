use serde::{Deserialize, Serialize};

use crate::{AsStr, user};

/// Appearance preference supplied by the surrounding application.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const fn emoji_theme(&self) -> EmojiTheme {
        match self {
            Self::Light => EmojiTheme::Light,
            Self::Dark => EmojiTheme::Dark,
            Self::System => EmojiTheme::Auto,
        }
    }
}

impl AsStr for Theme {
    fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmojiTheme {
    Light,
    Dark,
    Auto,
}

impl AsStr for EmojiTheme {
    fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

/// Who is acting and how the UI should look. Handed to every component
/// at construction and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Session {
    user: user::Id,
    theme: Theme,
}

impl Session {
    pub fn new(user: user::Id, theme: Theme) -> Self {
        Self { user, theme }
    }

    pub const fn user(&self) -> &user::Id {
        &self.user
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }
}
