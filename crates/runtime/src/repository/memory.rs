//! In-memory document store for tests and local runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use hunt_core::{ActorId, CombatantId, EncounterId};

use crate::api::{CollaboratorError, CombatantUpdate, DocumentStore};

use super::fields::actor_fields;

type Document = BTreeMap<String, Value>;

/// Flat documents keyed by dotted field path.
///
/// Batches are converted before the write lock is taken, so a batch that
/// fails to serialize leaves the document untouched.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    actors: RwLock<HashMap<ActorId, Document>>,
    encounters: RwLock<HashMap<EncounterId, BTreeMap<CombatantId, f64>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an actor's `clock` field (hunters spend clock outside the core).
    pub fn set_actor_clock(&self, actor: &ActorId, clock: f64) -> Result<(), CollaboratorError> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        actors
            .entry(actor.clone())
            .or_default()
            .insert(CLOCK_FIELD.to_owned(), Value::from(clock));
        Ok(())
    }

    /// Value stored at `path` on an actor document.
    pub fn actor_field(&self, actor: &ActorId, path: &str) -> Option<Value> {
        let actors = self.actors.read().ok()?;
        actors.get(actor)?.get(path).cloned()
    }

    /// Persisted initiative of a combatant.
    pub fn initiative(&self, encounter: &EncounterId, combatant: CombatantId) -> Option<f64> {
        let encounters = self.encounters.read().ok()?;
        encounters.get(encounter)?.get(&combatant).copied()
    }
}

const CLOCK_FIELD: &str = "system.clock";

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn apply_actor_updates(
        &self,
        actor: &ActorId,
        updates: &[hunt_core::ActorUpdate],
    ) -> Result<(), CollaboratorError> {
        let fields = actor_fields(updates)?;
        let mut actors = self
            .actors
            .write()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        actors.entry(actor.clone()).or_default().extend(fields);
        Ok(())
    }

    async fn apply_combatant_updates(
        &self,
        encounter: &EncounterId,
        updates: &[CombatantUpdate],
    ) -> Result<(), CollaboratorError> {
        let mut encounters = self
            .encounters
            .write()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        let roster = encounters.entry(encounter.clone()).or_default();
        for update in updates {
            roster.insert(update.combatant, update.initiative);
        }
        Ok(())
    }

    async fn actor_clock(&self, actor: &ActorId) -> Result<Option<f64>, CollaboratorError> {
        let actors = self
            .actors
            .read()
            .map_err(|_| CollaboratorError::LockPoisoned)?;
        Ok(actors
            .get(actor)
            .and_then(|doc| doc.get(CLOCK_FIELD))
            .and_then(Value::as_f64))
    }
}

#[cfg(test)]
mod tests {
    use hunt_core::ActorUpdate;

    use super::*;

    #[tokio::test]
    async fn clock_round_trips_through_updates() {
        let store = InMemoryDocumentStore::new();
        let rathalos = ActorId::new("rathalos");

        assert_eq!(store.actor_clock(&rathalos).await.unwrap(), None);

        store
            .apply_actor_updates(&rathalos, &[ActorUpdate::Clock(3.0), ActorUpdate::Health(90)])
            .await
            .unwrap();

        assert_eq!(store.actor_clock(&rathalos).await.unwrap(), Some(3.0));
        assert_eq!(
            store.actor_field(&rathalos, "system.health.value"),
            Some(Value::from(90))
        );
    }

    #[tokio::test]
    async fn combatant_updates_are_per_encounter() {
        let store = InMemoryDocumentStore::new();
        let hunt = EncounterId::new("hunt");

        store
            .apply_combatant_updates(
                &hunt,
                &[CombatantUpdate {
                    combatant: CombatantId(1),
                    initiative: 2.0,
                }],
            )
            .await
            .unwrap();

        assert_eq!(store.initiative(&hunt, CombatantId(1)), Some(2.0));
        assert_eq!(store.initiative(&EncounterId::new("other"), CombatantId(1)), None);
    }
}
