//! Unified error types surfaced by the runtime API.
//!
//! Wraps session failures alongside the driver's own so clients can bubble
//! them up with consistent context.
use thiserror::Error;

use tactics_core::{ErrorSeverity, GameError, SessionError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("session stalled: nothing queued and no intent expected")]
    Stalled,

    #[error("event serialization failed")]
    Serialize(#[source] serde_json::Error),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(inner) => inner.severity(),
            Self::Stalled | Self::Serialize(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(inner) => inner.error_code(),
            Self::Stalled => "runtime_stalled",
            Self::Serialize(_) => "runtime_serialize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_keep_their_code() {
        let torn = RuntimeError::from(SessionError::TornDown);
        assert_eq!(torn.error_code(), "session_torn_down");
        assert_eq!(torn.severity(), ErrorSeverity::Internal);
        assert_eq!(RuntimeError::Stalled.error_code(), "runtime_stalled");
    }
}
