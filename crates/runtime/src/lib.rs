//! Async orchestration for encounter sessions.
//!
//! The core session is synchronous and runs on a virtual clock. This crate
//! wraps it for async callers: an [`EncounterDriver`] pulls party intents
//! from an [`IntentProvider`], sleeps through presentation delays and
//! republishes events on a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the provider trait and error types
//! - [`driver`] hosts the run loop
//! - [`events`] provides the event bus, tracing mirror and JSON records
//! - [`providers`] ships scripted and auto-play providers
pub mod api;
pub mod driver;
pub mod events;
pub mod providers;

pub use api::{EndTurnProvider, IntentProvider, Result, RuntimeError};
pub use driver::{DriverConfig, DriverOutcome, EncounterDriver, Pace, RecordSink, SharedSession};
pub use events::{EventBus, EventRecord, Topic, TracingListener};
pub use providers::{AutoPilot, ScriptedProvider};
