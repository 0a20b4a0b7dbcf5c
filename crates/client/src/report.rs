//! Human-readable rendering of encounter output.

use std::fmt::Write as _;

use tactics_core::{EncounterEvent, EncounterSummary, Roster};
use tactics_runtime::EventRecord;

/// One line per event, prefixed with virtual time.
pub fn describe(record: &EventRecord) -> String {
    let at = record.at.0;
    let text = match &record.event {
        EncounterEvent::RoundAdvanced { round } => format!("-- round {round} --"),
        EncounterEvent::TurnStarted { unit, side, .. } => format!("{unit} ({side}) takes the turn"),
        EncounterEvent::SelectionChanged {
            unit: Some(unit),
            reachable,
        } => format!("{unit} selected, {} cells in reach", reachable.len()),
        EncounterEvent::SelectionChanged { unit: None, .. } => "selection cleared".to_owned(),
        EncounterEvent::UnitMoved { unit, from, path } => match path.last() {
            Some(to) => format!("{unit} moves {from} -> {to}"),
            None => format!("{unit} stays at {from}"),
        },
        EncounterEvent::AttackResolved {
            attacker,
            target,
            damage,
            remaining_hp,
            ..
        } => format!("{attacker} hits {target} for {damage} ({remaining_hp} hp left)"),
        EncounterEvent::UnitDied { unit } => format!("{unit} falls"),
        EncounterEvent::EncounterEnded { outcome } => format!("encounter over: {outcome}"),
    };
    format!("[{at:>6}ms] {text}")
}

/// Outcome, rewards and survivor health.
pub fn summarize(summary: &EncounterSummary, roster: &Roster) -> String {
    let mut out = format!(
        "{} after {} round(s), {} exp",
        summary.outcome, summary.rounds, summary.experience
    );
    for survivor in &summary.survivors {
        let name = roster
            .get(survivor.id)
            .map(|unit| unit.name.as_str())
            .unwrap_or("?");
        let _ = write!(
            out,
            "\n  {} {name}: {}/{} hp, {} mp",
            survivor.id, survivor.hp, survivor.max_hp, survivor.mp
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Cell, Millis, UnitId};

    #[test]
    fn describes_moves_and_attacks() {
        let moved = EventRecord::new(
            Millis(150),
            EncounterEvent::UnitMoved {
                unit: UnitId(1),
                from: Cell::new(0, 3),
                path: vec![Cell::new(1, 3), Cell::new(2, 3)],
            },
        );
        assert_eq!(describe(&moved), "[   150ms] #1 moves (0, 3) -> (2, 3)");

        let hit = EventRecord::new(
            Millis(0),
            EncounterEvent::AttackResolved {
                attacker: UnitId(1),
                target: UnitId(5),
                damage: 4,
                lethal: false,
                remaining_hp: 26,
            },
        );
        assert_eq!(describe(&hit), "[     0ms] #1 hits #5 for 4 (26 hp left)");
    }
}
