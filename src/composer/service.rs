use std::sync::Arc;

use log::{debug, error, warn};
use tokio::sync::RwLock;

use crate::api;
use crate::lifecycle::Lifecycle;
use crate::message::Message;
use crate::session::Session;
use crate::store::{Collection, Refetcher};

use super::model::{Draft, Key, KeyOutcome, Measure};
use super::{Error, MIN_HEIGHT};

/// Message footer of an open chat.
#[derive(Clone)]
pub struct Composer {
    session: Arc<Session>,
    api: api::Service,
    messages: Collection<Message>,
    refetcher: Refetcher,
    draft: Arc<RwLock<Draft>>,
    lifecycle: Lifecycle,
}

impl Composer {
    pub fn new(
        session: Arc<Session>,
        api: api::Service,
        messages: Collection<Message>,
        refetcher: Refetcher,
    ) -> Self {
        Self {
            session,
            api,
            messages,
            refetcher,
            draft: Arc::new(RwLock::new(Draft::default())),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn draft(&self) -> Draft {
        self.draft.read().await.clone()
    }

    pub fn dispose(&self) {
        self.lifecycle.dispose();
    }
}

// input events
impl Composer {
    pub async fn append_emoji(&self, symbol: &str) {
        self.draft.write().await.text.push_str(symbol);
    }

    pub async fn toggle_emoji_panel(&self) -> bool {
        let mut draft = self.draft.write().await;
        draft.emoji_panel_open = !draft.emoji_panel_open;
        draft.emoji_panel_open
    }

    pub async fn on_text_changed(&self, text: impl Into<String>, measure: Measure) {
        let mut draft = self.draft.write().await;
        draft.text = text.into();
        draft.error = None;
        draft.grow(measure);
    }

    /// Called before the key takes effect. Enter alone sends, Shift+Enter
    /// keeps the native newline.
    pub async fn on_key_press(&self, key: Key, shift: bool, rendered_height: u32) -> KeyOutcome {
        match key {
            Key::Enter if !shift => KeyOutcome::Submit(self.submit().await),
            Key::Backspace if rendered_height > MIN_HEIGHT => {
                match self.draft.write().await.shrink_on_backspace() {
                    Some(height) => KeyOutcome::Shrunk(height),
                    None => KeyOutcome::Native,
                }
            }
            _ => KeyOutcome::Native,
        }
    }

    /// Attachments are not uploaded yet; the selection is dropped.
    pub fn on_select_files(&self, count: usize) {
        warn!("ignoring {count} selected file(s), attachments are not supported");
    }
}

impl Composer {
    /// Sends the draft as typed.
    ///
    /// Blank drafts and a second send while one is outstanding are refused
    /// without contacting the server. On failure the draft is kept for a
    /// retry and the error is recorded for display.
    pub async fn submit(&self) -> super::Result<Message> {
        if self.lifecycle.is_disposed() {
            return Err(Error::Disposed);
        }

        let body = {
            let mut draft = self.draft.write().await;
            if draft.submitting {
                debug!("send already in flight, ignoring submit");
                return Err(Error::InFlight);
            }
            if draft.text.trim().is_empty() {
                debug!("empty draft, nothing to send");
                return Err(Error::EmptyDraft);
            }

            draft.submitting = true;
            draft.error = None;
            draft.text.clone()
        };

        let sender = self.session.user();
        debug!("sending message as {sender}");

        match self.api.send_message(sender, &body).await {
            Ok(message) => {
                if self.lifecycle.is_disposed() {
                    debug!("composer disposed, keeping draft state as is");
                } else {
                    self.draft.write().await.reset();
                }

                self.messages.append(message.clone());
                self.refetcher.refetch().await;

                Ok(message)
            }
            Err(e) => {
                error!("could not send message: {e}");

                if !self.lifecycle.is_disposed() {
                    let mut draft = self.draft.write().await;
                    draft.submitting = false;
                    draft.error = Some(e.to_string());
                }

                Err(e.into())
            }
        }
    }
}
