use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::AsStr;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum View {
    #[serde(rename = "DELETE_CHAT_CONFIRMATION")]
    DeleteChatConfirmation,
}

impl AsStr for View {
    fn as_str(&self) -> &str {
        match self {
            Self::DeleteChatConfirmation => "DELETE_CHAT_CONFIRMATION",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Sm,
    Md,
    Lg,
    Xl,
}

impl AsStr for Size {
    fn as_str(&self) -> &str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Request<P> {
    pub view: View,
    pub size: Size,
    pub payload: P,
}

/// Hands a request to whatever shows modals. The outcome is not observed.
pub trait Opener<P> {
    fn open(&self, request: Request<P>);
}

pub type Service<P> = Arc<dyn Opener<P> + Send + Sync>;

/// Forwards requests to a receiver owned by the modal host.
pub struct ChannelOpener<P> {
    tx: mpsc::UnboundedSender<Request<P>>,
}

impl<P> Clone for ChannelOpener<P> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<P> ChannelOpener<P> {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Request<P>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl<P: Send> Opener<P> for ChannelOpener<P> {
    fn open(&self, request: Request<P>) {
        debug!("opening modal {}", request.view.as_str());
        if self.tx.send(request).is_err() {
            warn!("modal host is gone, request dropped");
        }
    }
}
