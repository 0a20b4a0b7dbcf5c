//! Topic-based event bus for encounter events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. [`TracingListener`] mirrors every event into the
//! log, and [`EventRecord`] stamps events for JSON output.

mod bus;
mod log;
mod record;

pub use bus::{EventBus, Topic};
pub use log::TracingListener;
pub use record::EventRecord;
