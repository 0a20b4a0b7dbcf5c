//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`TurnError`, `AttackRejection`, `RejectedIntent`,
//! `SessionError`, `SetupError`) live next to the components that produce
//! them. This module provides the shared classification used by callers to
//! decide whether to retry, ignore or abort.
//!
//! # Classes
//!
//! - **Rejected intents** are expected and common (the UI feeds speculative
//!   input). They never change state and are safe to retry.
//! - **Invariant violations** are programming errors such as advancing a
//!   scheduler that was never started or driving a torn-down session.
//! - **No-ops** (empty roster, zero budget) are not errors at all; they return
//!   empty results.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same or another intent may succeed later.
    ///
    /// Examples: target out of range, action already in flight
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: duplicate unit ids, unit placed on an obstacle
    Validation,

    /// Internal error - the caller broke a usage contract.
    ///
    /// Examples: advancing before start, driving a torn-down session
    Internal,

    /// Fatal error - state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the caller.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable snake_case code per variant
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used for log fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
