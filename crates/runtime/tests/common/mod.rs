//! Collaborators shared by the runtime integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use hunt_core::{ActorId, ActorUpdate, EncounterId};
use hunt_runtime::{
    CollaboratorError, CombatantUpdate, DocumentStore, FormulaEvaluator, InMemoryDocumentStore,
    Notice, NoticeKind, Notifier, RollResult, RollVariables, Runtime,
};

/// Evaluator returning fixed totals: `1d20` rolls `hit`, formulas starting
/// with `element_prefix` roll `element`, `0` rolls zero, the rest `damage`.
pub struct FixedEvaluator {
    pub hit: f64,
    pub damage: f64,
    pub element: f64,
    pub element_prefix: &'static str,
}

#[async_trait]
impl FormulaEvaluator for FixedEvaluator {
    async fn evaluate(
        &self,
        formula: &str,
        _vars: &RollVariables,
    ) -> Result<RollResult, CollaboratorError> {
        let total = match formula {
            "1d20" => self.hit,
            "0" => 0.0,
            f if f.starts_with(self.element_prefix) => self.element,
            _ => self.damage,
        };
        Ok(RollResult {
            total,
            breakdown: format!("{formula} = {total}"),
        })
    }
}

#[derive(Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self, kind: NoticeKind) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.kind == kind)
            .map(|notice| notice.message)
            .collect()
    }
}

#[async_trait]
impl Notifier for CollectingNotifier {
    async fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// In-memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryDocumentStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CollaboratorError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Store("disk full".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn apply_actor_updates(
        &self,
        actor: &ActorId,
        updates: &[ActorUpdate],
    ) -> Result<(), CollaboratorError> {
        self.check()?;
        self.inner.apply_actor_updates(actor, updates).await
    }

    async fn apply_combatant_updates(
        &self,
        encounter: &EncounterId,
        updates: &[CombatantUpdate],
    ) -> Result<(), CollaboratorError> {
        self.check()?;
        self.inner.apply_combatant_updates(encounter, updates).await
    }

    async fn actor_clock(&self, actor: &ActorId) -> Result<Option<f64>, CollaboratorError> {
        self.inner.actor_clock(actor).await
    }
}

pub struct TestRuntime {
    pub runtime: Runtime,
    pub store: Arc<InMemoryDocumentStore>,
    pub notifier: Arc<CollectingNotifier>,
}

fn evaluator() -> Arc<FixedEvaluator> {
    Arc::new(FixedEvaluator {
        hit: 14.0,
        damage: 60.0,
        element: 8.0,
        element_prefix: "1d4",
    })
}

/// Runtime backed by a [`FlakyStore`].
pub fn flaky_runtime() -> (Runtime, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::default());
    let runtime = Runtime::builder()
        .evaluator(evaluator())
        .store(store.clone())
        .notifier(Arc::new(CollectingNotifier::default()))
        .build();
    (runtime, store)
}

pub fn runtime() -> TestRuntime {
    let store = Arc::new(InMemoryDocumentStore::new());
    let notifier = Arc::new(CollectingNotifier::default());
    let runtime = Runtime::builder()
        .evaluator(evaluator())
        .store(store.clone())
        .notifier(notifier.clone())
        .build();

    TestRuntime {
        runtime,
        store,
        notifier,
    }
}
