//! A write rejected by the document store leaves the worker's state as it
//! was, so retrying the same command applies it exactly once.

mod common;

use hunt_content::{MonsterLoader, builtin};
use hunt_core::{ActorId, Combatant, EncounterId, EncounterPhase, Hit, PartId, PartTemplate};
use hunt_runtime::{CollaboratorError, RuntimeError};

fn party() -> Vec<Combatant> {
    vec![
        Combatant::hunter(1, "aiko", 0),
        Combatant::monster(2, "rathalos", 1),
    ]
}

fn is_store_error(error: &RuntimeError) -> bool {
    matches!(
        error,
        RuntimeError::Collaborator(CollaboratorError::Store(_))
    )
}

#[tokio::test]
async fn failed_writes_do_not_move_the_encounter() {
    let (mut runtime, store) = common::flaky_runtime();
    store
        .inner
        .set_actor_clock(&ActorId::new("aiko"), 4.0)
        .unwrap();
    let handle = runtime
        .spawn_encounter(EncounterId::new("wildspire"), party())
        .unwrap();

    store.set_failing(true);
    assert!(is_store_error(&handle.start().await.unwrap_err()));
    assert_eq!(handle.query().await.unwrap().phase(), EncounterPhase::NotStarted);

    store.set_failing(false);
    handle.start().await.unwrap();

    store.set_failing(true);
    assert!(is_store_error(&handle.advance_turn().await.unwrap_err()));
    let unchanged = handle.query().await.unwrap();
    assert_eq!(unchanged.turn(), 0);
    assert!(unchanged.history().is_empty());

    store.set_failing(false);
    let advance = handle.advance_turn().await.unwrap();
    assert_eq!(advance.turn, 1);
    let advanced = handle.query().await.unwrap();
    assert_eq!(advanced.history().len(), 1);
    assert_eq!(advanced.combatants()[0].initiative, 4.0);

    store.set_failing(true);
    assert!(is_store_error(&handle.retreat_turn().await.unwrap_err()));
    assert_eq!(handle.query().await.unwrap(), advanced);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_writes_do_not_touch_the_sheet() {
    let (mut runtime, store) = common::flaky_runtime();
    let rathalos = MonsterLoader::parse(builtin::MONSTERS)
        .unwrap()
        .find("rathalos")
        .unwrap()
        .build();
    let monster = runtime.spawn_monster(rathalos).unwrap();
    let before = monster.query().await.unwrap();

    store.set_failing(true);
    // Head: Blunt 7.0 -> 35 raw
    let hit = Hit::new("Aiko", "Part0", "Blunt", 50.0);
    assert!(is_store_error(&monster.take_hit(hit.clone()).await.unwrap_err()));
    assert!(is_store_error(&monster.tick_round().await.unwrap_err()));
    assert!(is_store_error(&monster.attack(25.0, 3.0, 8).await.unwrap_err()));
    assert!(is_store_error(
        &monster.add_part(PartTemplate::default()).await.unwrap_err()
    ));
    assert_eq!(monster.query().await.unwrap(), before);

    store.set_failing(false);
    let outcome = monster.take_hit(hit).await.unwrap();
    assert_eq!(outcome.health, 1200 - 35);

    let sheet = monster.query().await.unwrap();
    assert_eq!(sheet.health.current, 1165);
    assert_eq!(sheet.damage_log.entry("Aiko").unwrap().values, vec![35]);
    assert_eq!(sheet.parts[&PartId::new("Part0")].stagger_damage, 35);

    drop(monster);
    runtime.shutdown().await.unwrap();
}
