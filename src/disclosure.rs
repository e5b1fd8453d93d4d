use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::AsStr;

/// Distance in pixels the trigger must keep from the bottom of the viewport
/// for a flyout to open downwards.
pub const FLYOUT_CLEARANCE: f64 = 100.0;

/// Open/closed state behind a trigger and its flyout content.
#[derive(Clone, Default)]
pub struct Disclosure {
    open: Arc<AtomicBool>,
}

impl Disclosure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Flips the state and returns the new one.
    pub fn toggle(&self) -> bool {
        !self.open.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

/// Where flyout content goes relative to its trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Below,
    AboveRight,
}

impl Placement {
    /// Computed from the trigger's current bottom edge each time; nothing is cached.
    pub fn measure(trigger_bottom: f64, viewport_height: f64) -> Self {
        if trigger_bottom < viewport_height - FLYOUT_CLEARANCE {
            Self::Below
        } else {
            Self::AboveRight
        }
    }

    pub const fn content_class(&self) -> Option<&'static str> {
        match self {
            Self::Below => None,
            Self::AboveRight => Some("mb-7"),
        }
    }
}

impl AsStr for Placement {
    fn as_str(&self) -> &str {
        match self {
            Self::Below => "right",
            Self::AboveRight => "top-right",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_toggle_back_to_initial_state() {
        let disclosure = Disclosure::new();

        assert!(disclosure.toggle());
        assert!(disclosure.is_open());
        assert!(!disclosure.toggle());
        assert!(!disclosure.is_open());
    }

    #[test]
    fn should_share_state_between_clones() {
        let disclosure = Disclosure::new();
        let clone = disclosure.clone();

        disclosure.open();
        assert!(clone.is_open());

        clone.close();
        assert!(!disclosure.is_open());
    }

    #[test]
    fn should_place_below_when_far_from_viewport_bottom() {
        assert_eq!(Placement::measure(300.0, 800.0), Placement::Below);
        assert_eq!(Placement::measure(699.0, 800.0), Placement::Below);
    }

    #[test]
    fn should_place_above_right_near_viewport_bottom() {
        assert_eq!(Placement::measure(700.0, 800.0), Placement::AboveRight);
        assert_eq!(Placement::measure(790.0, 800.0), Placement::AboveRight);
        assert_eq!(Placement::AboveRight.as_str(), "top-right");
        assert_eq!(Placement::AboveRight.content_class(), Some("mb-7"));
    }
}
