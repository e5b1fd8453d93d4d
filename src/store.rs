use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

/// Caller-owned list shared with the components that update it.
///
/// Elements are never changed in place: every update publishes a new
/// `Arc<[T]>`, so a subscriber can tell a change by pointer identity.
pub struct Collection<T> {
    tx: Arc<watch::Sender<Arc<[T]>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let (tx, _) = watch::channel(Arc::from(items));
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Arc<[T]> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<[T]>> {
        self.tx.subscribe()
    }

    pub fn replace(&self, items: Vec<T>) {
        self.tx.send_replace(Arc::from(items));
    }

    pub fn append(&self, item: T) {
        self.tx.send_modify(|items| {
            let mut next = items.to_vec();
            next.push(item);
            *items = Arc::from(next);
        });
    }

    /// Rebuilds the list through `f`, element by element.
    pub fn map<F>(&self, f: F)
    where
        F: Fn(&T) -> T,
    {
        self.tx.send_modify(|items| {
            let next = items.iter().map(&f).collect::<Vec<_>>();
            *items = Arc::from(next);
        });
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Reloads an authoritative list from the remote source.
#[async_trait]
pub trait Refetch {
    async fn refetch(&self);
}

pub type Refetcher = Arc<dyn Refetch + Send + Sync>;
