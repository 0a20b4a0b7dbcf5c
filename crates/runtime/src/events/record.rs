use serde::{Deserialize, Serialize};
use tactics_core::{EncounterEvent, Millis};

use crate::api::{Result, RuntimeError};

/// An encounter event stamped with the virtual time it was drained at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub at: Millis,
    #[serde(flatten)]
    pub event: EncounterEvent,
}

impl EventRecord {
    pub fn new(at: Millis, event: EncounterEvent) -> Self {
        Self { at, event }
    }

    /// Single-line JSON form, suitable for newline-delimited output.
    pub fn to_json_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(RuntimeError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::UnitId;

    #[test]
    fn records_flatten_the_event_tag() {
        let record = EventRecord::new(Millis(450), EncounterEvent::UnitDied { unit: UnitId(7) });
        let line = record.to_json_line().unwrap();

        assert_eq!(line, r#"{"at":450,"type":"unit_died","unit":7}"#);
        let back: EventRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
