use crate::message::Message;

use super::{GROW_PADDING, LINE_STEP, MIN_HEIGHT};

/// Everything the footer needs to render the pending message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub height_px: u32,
    pub emoji_panel_open: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            text: String::new(),
            height_px: MIN_HEIGHT,
            emoji_panel_open: false,
            submitting: false,
            error: None,
        }
    }
}

impl Draft {
    /// Whether the send control should look active.
    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(super) fn grow(&mut self, measure: Measure) {
        if measure.overflows() {
            self.height_px = (measure.scroll_height + GROW_PADDING).max(MIN_HEIGHT);
        }
    }

    /// Shrinks by one line when the backspace about to be applied leaves the
    /// final line empty. Returns the new height if it changed.
    pub(super) fn shrink_on_backspace(&mut self) -> Option<u32> {
        if !last_line_empty_after_deletion(&self.text) {
            return None;
        }

        let height = self.height_px.saturating_sub(LINE_STEP).max(MIN_HEIGHT);
        if height == self.height_px {
            return None;
        }

        self.height_px = height;
        Some(height)
    }
}

/// Whether the final line is empty once the last character is removed.
fn last_line_empty_after_deletion(text: &str) -> bool {
    let Some((last, _)) = text.char_indices().last() else {
        return false;
    };

    text[..last].rsplit('\n').next().is_some_and(str::is_empty)
}

/// Heights of the input surface as laid out by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measure {
    pub scroll_height: u32,
    pub client_height: u32,
}

impl Measure {
    pub const fn new(scroll_height: u32, client_height: u32) -> Self {
        Self {
            scroll_height,
            client_height,
        }
    }

    const fn overflows(&self) -> bool {
        self.scroll_height != self.client_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Other,
}

#[derive(Debug)]
pub enum KeyOutcome {
    /// Enter without Shift: the default newline is suppressed and a send was attempted.
    Submit(super::Result<Message>),
    /// The input shrank by a line; the key keeps its default effect.
    Shrunk(u32),
    /// Nothing to do; the key keeps its default effect.
    Native,
}

impl KeyOutcome {
    pub const fn prevents_default(&self) -> bool {
        matches!(self, Self::Submit(_))
    }
}
