use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::chat::{self, Chat};
use crate::message::{self, Message};
use crate::store::Refetch;
use crate::user;

use super::{ChatApi, Error};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Send(user::Id, String),
    MarkRead(chat::Id),
    MarkUnread(chat::Id),
    Archive(chat::Id),
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Failure {
    Network,
    Validation,
    NotFound,
    Permission,
}

impl Failure {
    fn error(&self) -> Error {
        match self {
            Self::Network => Error::Network,
            Self::Validation => Error::Validation("body rejected".into()),
            Self::NotFound => Error::NotFound,
            Self::Permission => Error::Permission,
        }
    }
}

/// Records every call; optionally fails or waits on a gate before answering.
#[derive(Default)]
pub(crate) struct FakeApi {
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<Failure>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Mutex::new(Some(failure)),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: Call) -> super::Result<usize> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.len()
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match *self.failure.lock().unwrap() {
            Some(f) => Err(f.error()),
            None => Ok(n),
        }
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn send_message(&self, sender: &user::Id, body: &str) -> super::Result<Message> {
        let n = self
            .answer(Call::Send(sender.clone(), body.to_string()))
            .await?;
        Ok(Message::new(
            message::Id(format!("m-{n}")),
            sender.clone(),
            body,
        ))
    }

    async fn mark_read(&self, chat: &Chat) -> super::Result<()> {
        self.answer(Call::MarkRead(chat.id.clone())).await.map(|_| ())
    }

    async fn mark_unread(&self, chat: &Chat) -> super::Result<()> {
        self.answer(Call::MarkUnread(chat.id.clone()))
            .await
            .map(|_| ())
    }

    async fn archive(&self, chat: &Chat) -> super::Result<()> {
        self.answer(Call::Archive(chat.id.clone())).await.map(|_| ())
    }
}

#[derive(Default)]
pub(crate) struct FakeRefetch {
    count: AtomicUsize,
}

impl FakeRefetch {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refetch for FakeRefetch {
    async fn refetch(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
