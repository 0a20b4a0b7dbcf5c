use std::sync::Arc;
use std::time::Duration;

use tactics_content::{ScenarioLoader, TemplateCatalog};
use tactics_core::{
    Cell, EncounterConfig, EncounterEvent, EncounterSession, GridDimensions, Intent, Outcome,
    ResourceMeter, Side, Unit, UnitId, UnitStats,
};
use tactics_runtime::{
    AutoPilot, DriverConfig, DriverOutcome, EncounterDriver, EventBus, Pace, ScriptedProvider,
    SharedSession, Topic,
};
use tokio::sync::Mutex;

const HERO: UnitId = UnitId(1);
const GOBLIN: UnitId = UnitId(2);

fn unit(id: UnitId, side: Side, col: i32, str: u32, speed: u32) -> Unit {
    Unit::new(id, format!("unit-{}", id.0), side, Cell::new(col, 0))
        .with_stats(UnitStats {
            hp: ResourceMeter::full(10),
            str,
            speed,
            ..UnitStats::default()
        })
        .with_mobility(3)
        .with_range(1)
}

/// Hero one step from a goblin it kills in a single blow.
fn duel(hero_speed: u32, goblin_speed: u32, config: EncounterConfig) -> SharedSession {
    let session = EncounterSession::start(
        vec![unit(HERO, Side::Player, 0, 50, hero_speed)],
        vec![unit(GOBLIN, Side::Enemy, 1, 1, goblin_speed)],
        &[],
        GridDimensions::new(6, 2),
        config,
    )
    .unwrap();
    Arc::new(Mutex::new(session))
}

#[tokio::test(start_paused = true)]
async fn autopilot_clears_the_dark_forest() {
    let scenario = ScenarioLoader::builtin("dark_forest")
        .unwrap()
        .resolve(&TemplateCatalog::builtin())
        .unwrap();
    let session = Arc::new(Mutex::new(scenario.start(EncounterConfig::new()).unwrap()));

    let mut driver = EncounterDriver::new(&session, AutoPilot::new()).with_pace(Pace::Realtime);
    let outcome = tokio::time::timeout(Duration::from_secs(3600), driver.run())
        .await
        .expect("encounter should finish")
        .unwrap();

    let DriverOutcome::Finished(summary) = outcome else {
        panic!("expected a finished encounter, got {outcome:?}");
    };
    assert_eq!(summary.outcome, Outcome::Victory);
    assert_eq!(summary.experience, 100);
    assert!(!summary.survivors.is_empty());
    assert!(session.lock().await.outcome().is_decided());
}

#[tokio::test]
async fn scripted_duel_publishes_to_the_bus() {
    let session = duel(5, 1, EncounterConfig::instant());
    let bus = EventBus::new();
    let mut actions = bus.subscribe(Topic::Action);
    let mut ending = bus.subscribe(Topic::Encounter);

    let script = ScriptedProvider::new([
        // Rejected: nothing selected yet.
        Intent::Attack { target: GOBLIN },
        Intent::Select { unit: HERO },
        Intent::Attack { target: GOBLIN },
    ]);
    let mut driver = EncounterDriver::new(&session, script).with_bus(bus);
    let outcome = driver.run().await.unwrap();

    assert!(matches!(outcome, DriverOutcome::Finished(ref s) if s.outcome == Outcome::Victory));
    assert_eq!(
        ending.recv().await.unwrap(),
        EncounterEvent::EncounterEnded {
            outcome: Outcome::Victory
        }
    );

    let mut seen = Vec::new();
    while let Ok(event) = actions.try_recv() {
        seen.push(event.name());
    }
    assert_eq!(
        seen,
        ["selection_changed", "attack_resolved", "unit_died", "selection_changed"]
    );
}

#[tokio::test(start_paused = true)]
async fn journal_is_stamped_with_virtual_time() {
    let session = duel(1, 5, EncounterConfig::new());
    let config = DriverConfig {
        pace: Pace::Realtime,
        keep_journal: true,
        ..DriverConfig::default()
    };
    let mut driver = EncounterDriver::new(&session, AutoPilot::new()).with_config(config);
    driver.run().await.unwrap();

    let journal = driver.into_journal();
    assert_eq!(
        journal.first().map(|record| &record.event),
        Some(&EncounterEvent::RoundAdvanced { round: 1 })
    );
    assert!(matches!(
        journal.last().map(|record| &record.event),
        Some(EncounterEvent::EncounterEnded { .. })
    ));
    assert!(journal.windows(2).all(|pair| pair[0].at <= pair[1].at));
    // The goblin thinks before its first swing.
    let first_attack = journal
        .iter()
        .find(|record| matches!(record.event, EncounterEvent::AttackResolved { .. }))
        .unwrap();
    assert_eq!(first_attack.at.0, EncounterConfig::DEFAULT_AI_THINK_MS);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_abandons_the_driver() {
    // Goblin acts first, so the driver is asleep on its think delay.
    let session = duel(1, 5, EncounterConfig::new());
    let mut driver = EncounterDriver::new(&session, AutoPilot::new()).with_pace(Pace::Realtime);
    let task = tokio::spawn(async move { driver.run().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(session);

    assert_eq!(task.await.unwrap().unwrap(), DriverOutcome::Abandoned);
}

#[tokio::test(start_paused = true)]
async fn teardown_while_waiting_abandons_the_driver() {
    let session = duel(1, 5, EncounterConfig::new());
    let mut driver = EncounterDriver::new(&session, AutoPilot::new()).with_pace(Pace::Realtime);
    let task = tokio::spawn(async move { driver.run().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    session.lock().await.teardown();

    assert_eq!(task.await.unwrap().unwrap(), DriverOutcome::Abandoned);
    let session = session.lock().await;
    assert!(session.is_torn_down());
    assert!(session.units().iter().all(|unit| unit.is_alive()));
}
