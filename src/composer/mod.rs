use crate::api;

pub mod markup;
pub mod model;
pub mod service;

pub use model::{Draft, Key, KeyOutcome, Measure};
pub use service::Composer;

pub type Result<T> = std::result::Result<T, Error>;

/// Smallest height of the input surface in pixels.
pub const MIN_HEIGHT: u32 = 48;
/// Height of one text line in pixels.
pub const LINE_STEP: u32 = 24;
/// Added to the measured scroll height when the input grows.
pub const GROW_PADDING: u32 = 4;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("message text is empty")]
    EmptyDraft,
    #[error("a message is already being sent")]
    InFlight,
    #[error("composer is disposed")]
    Disposed,

    #[error(transparent)]
    _Api(#[from] api::Error),
}
