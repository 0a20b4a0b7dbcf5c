//! Async driver that walks an encounter to its end.
//!
//! The driver holds only a weak reference to the session, so dropping the
//! last strong handle (or tearing the session down) makes a sleeping driver
//! wake up to nothing and return [`DriverOutcome::Abandoned`] instead of
//! resuming a dead encounter.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tactics_core::{
    EncounterSession, EncounterSnapshot, EncounterSummary, Intent, LifetimeToken, Millis,
    SessionError,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{IntentProvider, Result, RuntimeError};
use crate::events::{EventBus, EventRecord};

/// Shared handle to a running session.
pub type SharedSession = Arc<Mutex<EncounterSession>>;

/// How virtual time maps onto wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pace {
    /// Sleep for each continuation's delay before firing it.
    Realtime,
    /// Fire continuations back to back.
    #[default]
    Instant,
}

/// Driver settings.
#[derive(Clone, Debug)]
pub struct DriverConfig {
    pub pace: Pace,
    /// Consecutive rejected intents tolerated before the turn is ended for
    /// the provider.
    pub max_rejections: u32,
    /// Keep every drained event as an [`EventRecord`].
    pub keep_journal: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pace: Pace::Instant,
            max_rejections: 8,
            keep_journal: false,
        }
    }
}

/// How a driven encounter stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverOutcome {
    Finished(EncounterSummary),
    /// The session was dropped or torn down before it resolved.
    Abandoned,
}

enum Step {
    Done(DriverOutcome),
    Decide(EncounterSnapshot),
    Wait {
        deadline: Millis,
        delay: u64,
        token: LifetimeToken,
    },
}

/// Callback fed every drained event as it happens.
pub type RecordSink = Box<dyn FnMut(&EventRecord) + Send>;

/// Feeds provider intents into a session and advances its clock.
pub struct EncounterDriver {
    session: Weak<Mutex<EncounterSession>>,
    provider: Box<dyn IntentProvider>,
    bus: Option<EventBus>,
    sink: Option<RecordSink>,
    config: DriverConfig,
    journal: Vec<EventRecord>,
    rejections: u32,
}

impl EncounterDriver {
    pub fn new(session: &SharedSession, provider: impl IntentProvider + 'static) -> Self {
        Self {
            session: Arc::downgrade(session),
            provider: Box::new(provider),
            bus: None,
            sink: None,
            config: DriverConfig::default(),
            journal: Vec::new(),
            rejections: 0,
        }
    }

    /// Republish drained events on `bus`.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Hand each drained event to `sink`, stamped with virtual time.
    pub fn with_sink(mut self, sink: impl FnMut(&EventRecord) + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_pace(mut self, pace: Pace) -> Self {
        self.config.pace = pace;
        self
    }

    pub fn journal(&self) -> &[EventRecord] {
        &self.journal
    }

    pub fn into_journal(self) -> Vec<EventRecord> {
        self.journal
    }

    /// Runs until the encounter resolves or the session goes away.
    ///
    /// The session lock is never held across a provider call or a sleep.
    pub async fn run(&mut self) -> Result<DriverOutcome> {
        loop {
            let step = {
                let Some(session) = self.session.upgrade() else {
                    return Ok(DriverOutcome::Abandoned);
                };
                let mut session = session.lock().await;
                self.flush(&mut session);
                self.next_step(&session)?
            };

            match step {
                Step::Done(outcome) => {
                    if let DriverOutcome::Finished(summary) = &outcome {
                        info!(
                            outcome = %summary.outcome,
                            rounds = summary.rounds,
                            experience = summary.experience,
                            "encounter finished"
                        );
                    }
                    return Ok(outcome);
                }
                Step::Decide(view) => {
                    let intent = self.provider.next_intent(&view).await?;
                    if let Some(outcome) = self.submit(intent).await? {
                        return Ok(outcome);
                    }
                }
                Step::Wait {
                    deadline,
                    delay,
                    token,
                } => {
                    if self.config.pace == Pace::Realtime && delay > 0 {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    } else {
                        tokio::task::yield_now().await;
                    }
                    if !token.is_live() {
                        debug!("session torn down while waiting");
                        return Ok(DriverOutcome::Abandoned);
                    }
                    let Some(session) = self.session.upgrade() else {
                        return Ok(DriverOutcome::Abandoned);
                    };
                    let mut session = session.lock().await;
                    let elapsed = deadline - session.now();
                    match session.advance_time(elapsed) {
                        Ok(()) => {}
                        Err(SessionError::TornDown) => return Ok(DriverOutcome::Abandoned),
                        Err(err) => return Err(err.into()),
                    }
                }
            }
        }
    }

    fn next_step(&self, session: &EncounterSession) -> Result<Step> {
        if session.is_torn_down() {
            return Ok(Step::Done(DriverOutcome::Abandoned));
        }
        if session.outcome().is_decided() {
            return Ok(Step::Done(DriverOutcome::Finished(session.summary()?)));
        }
        if session.awaiting_intent() {
            return Ok(Step::Decide(session.snapshot()?));
        }
        match session.next_deadline() {
            Some(deadline) => Ok(Step::Wait {
                deadline,
                delay: deadline - session.now(),
                token: session.lifetime_token(),
            }),
            None => Err(RuntimeError::Stalled),
        }
    }

    async fn submit(&mut self, intent: Intent) -> Result<Option<DriverOutcome>> {
        let Some(session) = self.session.upgrade() else {
            return Ok(Some(DriverOutcome::Abandoned));
        };
        let mut session = session.lock().await;

        match session.submit(intent) {
            Ok(()) => {
                self.rejections = 0;
                Ok(None)
            }
            Err(SessionError::TornDown) => Ok(Some(DriverOutcome::Abandoned)),
            Err(SessionError::Rejected(reason)) => {
                warn!(intent = intent.name(), %reason, "provider intent rejected");
                self.provider.rejected(intent, reason);
                self.rejections += 1;

                if self.rejections >= self.config.max_rejections {
                    warn!(
                        rejections = self.rejections,
                        "too many rejected intents, ending turn"
                    );
                    self.rejections = 0;
                    session.intent_end_turn()?;
                }
                Ok(None)
            }
        }
    }

    fn flush(&mut self, session: &mut EncounterSession) {
        for (at, event) in session.drain_stamped_events() {
            if let Some(bus) = &self.bus {
                bus.publish(event.clone());
            }
            let record = EventRecord::new(at, event);
            if let Some(sink) = self.sink.as_mut() {
                sink(&record);
            }
            if self.config.keep_journal {
                self.journal.push(record);
            }
        }
    }
}
