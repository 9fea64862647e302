//! High-level runtime orchestrator.
//!
//! The runtime owns one background worker per encounter and per monster
//! sheet, wires up command/event channels, and hands out cloneable handles.

use std::collections::HashSet;
use std::env;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use hunt_core::{ActorId, Combatant, CombatSequencer, EncounterId, MonsterActor, RulesConfig};

use crate::api::{
    DocumentStore, EncounterHandle, FormulaEvaluator, MonsterHandle, Notifier, Result,
    RuntimeError,
};
use crate::events::{Event, EventBus, Topic};
use crate::providers::{DiceEvaluator, TracingNotifier};
use crate::repository::InMemoryDocumentStore;
use crate::roll::AttackRoller;
use crate::workers::{EncounterWorker, MonsterWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub rules: RulesConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `HUNT_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies `HUNT_*` environment variables on top of `self`.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(capacity) = read_env::<usize>("HUNT_COMMAND_BUFFER") {
            self.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("HUNT_EVENT_BUFFER") {
            self.event_buffer_size = capacity.max(1);
        }

        if let Some(interval) = read_env::<u32>("HUNT_STAMINA_DECAY_INTERVAL") {
            self.rules.stamina_decay_interval = interval;
        }
        if let Some(skip) = read_env::<bool>("HUNT_SKIP_DEFEATED") {
            self.rules.skip_defeated = skip;
        }

        self
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates encounters and monster sheets.
///
/// Handles returned by `spawn_*` keep their worker alive; drop them before
/// calling [`Runtime::shutdown`].
pub struct Runtime {
    config: RuntimeConfig,
    event_bus: EventBus,

    // Host collaborators
    evaluator: Arc<dyn FormulaEvaluator>,
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,

    encounters: HashSet<EncounterId>,
    monsters: HashSet<ActorId>,
    workers: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Subscribe to runtime events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    /// Roller sharing this runtime's evaluator and event bus.
    pub fn attack_roller(&self) -> AttackRoller {
        AttackRoller::new(Arc::clone(&self.evaluator), self.event_bus.clone())
    }

    /// Creates an encounter from `combatants` and starts its worker.
    ///
    /// The encounter still has to be started through the handle.
    pub fn spawn_encounter(
        &mut self,
        id: EncounterId,
        combatants: impl IntoIterator<Item = Combatant>,
    ) -> Result<EncounterHandle> {
        if self.encounters.contains(&id) {
            return Err(RuntimeError::DuplicateEncounter(id));
        }

        let sequencer = CombatSequencer::with_combatants(self.config.rules.clone(), combatants)?;
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = EncounterWorker::new(
            id.clone(),
            sequencer,
            command_rx,
            self.event_bus.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        );
        self.workers.push(tokio::spawn(worker.run()));
        self.encounters.insert(id.clone());

        Ok(EncounterHandle::new(id, command_tx, self.event_bus.clone()))
    }

    /// Starts a worker owning `monster`'s sheet.
    pub fn spawn_monster(&mut self, monster: MonsterActor) -> Result<MonsterHandle> {
        if self.monsters.contains(&monster.id) {
            return Err(RuntimeError::DuplicateMonster(monster.id));
        }

        let id = monster.id.clone();
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let worker = MonsterWorker::new(
            monster,
            self.config.rules.clone(),
            command_rx,
            self.event_bus.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
        );
        self.workers.push(tokio::spawn(worker.run()));
        self.monsters.insert(id.clone());

        Ok(MonsterHandle::new(id, command_tx, self.event_bus.clone()))
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for every worker; each one stops once all of its handles are dropped.
    pub async fn shutdown(self) -> Result<()> {
        for worker in self.workers {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    evaluator: Option<Arc<dyn FormulaEvaluator>>,
    store: Option<Arc<dyn DocumentStore>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            evaluator: None,
            store: None,
            notifier: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the dice formula evaluator (defaults to [`DiceEvaluator`])
    pub fn evaluator(mut self, evaluator: Arc<dyn FormulaEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Set the document store (defaults to [`InMemoryDocumentStore`])
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the notice sink (defaults to [`TracingNotifier`])
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Runtime {
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let evaluator = self
            .evaluator
            .unwrap_or_else(|| Arc::new(DiceEvaluator::new()));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryDocumentStore::new()));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));

        tracing::info!(
            command_buffer = self.config.command_buffer_size,
            event_buffer = self.config.event_buffer_size,
            "runtime built"
        );

        Runtime {
            config: self.config,
            event_bus,
            evaluator,
            store,
            notifier,
            encounters: HashSet::new(),
            monsters: HashSet::new(),
            workers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_rules_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[tokio::test]
    async fn duplicate_encounter_is_rejected() {
        let mut runtime = Runtime::builder().build();
        let id = EncounterId::new("hunt");

        let handle = runtime.spawn_encounter(id.clone(), Vec::new()).unwrap();
        let err = runtime.spawn_encounter(id, Vec::new()).err().unwrap();
        assert!(matches!(err, RuntimeError::DuplicateEncounter(_)));

        drop(handle);
        runtime.shutdown().await.unwrap();
    }
}
