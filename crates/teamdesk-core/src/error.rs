//! Error types for TeamDesk core.

use std::any::Any;

use thiserror::Error;

/// A failure raised by a bus handler while a message was being delivered.
///
/// Handlers report failures by returning `Err(HandlerFault)`. A panic inside a
/// handler is captured by the bus and converted into [`HandlerFault::Panicked`].
/// Neither stops delivery to the remaining handlers.
#[derive(Debug, Error)]
pub enum HandlerFault {
    /// The handler returned an error.
    #[error("handler failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The handler failed with a plain description.
    #[error("handler failed: {0}")]
    Message(String),

    /// The handler panicked during invocation.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerFault {
    /// Create a fault from a description.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap an arbitrary error.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Failed(Box::new(err))
    }

    /// Convert a panic payload captured by `catch_unwind`.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked(message)
    }

    /// Check whether the fault came from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }
}

/// Result type returned by bus handlers.
pub type HandlerResult = std::result::Result<(), HandlerFault>;
