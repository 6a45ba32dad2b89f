//! Event layer errors.
//!
//! # Error Code Convention
//!
//! All event errors use the `EVENT_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::InvalidPayload`] | `EVENT_INVALID_PAYLOAD` | No |
//!
//! Note what is *not* here: emitting a request cannot fail, and an
//! unknown request kind is inert by contract rather than an error.

use overlord_types::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event layer error.
///
/// # Example
///
/// ```
/// use overlord_event::EventError;
/// use overlord_types::ErrorCode;
///
/// let err = EventError::InvalidPayload("WOUND_HERO: missing field `id`".into());
/// assert_eq!(err.code(), "EVENT_INVALID_PAYLOAD");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
pub enum EventError {
    /// A request payload did not deserialize into the expected shape.
    ///
    /// The message names the request kind and the serde failure.
    /// **Not recoverable** — the payload will not change on retry; fix
    /// the emitter.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "EVENT_INVALID_PAYLOAD",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
