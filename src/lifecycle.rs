use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mount state shared by every clone of a component.
///
/// Remote calls resolve after an arbitrary delay; a component checks
/// [`Lifecycle::is_disposed`] before writing its own state on resolution.
#[derive(Clone, Default)]
pub struct Lifecycle {
    disposed: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
