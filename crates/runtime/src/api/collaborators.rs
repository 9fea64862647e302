//! Host collaborators the runtime depends on.
//!
//! The rules core never rolls dice, touches documents or talks to players
//! directly. Hosts plug in a [`FormulaEvaluator`], a [`DocumentStore`] and a
//! [`Notifier`]; the runtime ships in-memory and logging implementations for
//! tests and the demo binary.
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hunt_core::{ActorId, ActorUpdate, CombatantId, EncounterId};

use super::errors::CollaboratorError;

/// Named values a formula may reference as `@name`.
pub type RollVariables = BTreeMap<String, f64>;

/// Outcome of evaluating one formula.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollResult {
    pub total: f64,
    /// Human-readable expansion, e.g. `3d8[4,1,7]+5 = 17`.
    pub breakdown: String,
}

/// Dice formula evaluation.
#[async_trait]
pub trait FormulaEvaluator: Send + Sync {
    /// Evaluates `formula`, substituting `@name` references from `vars`.
    async fn evaluate(
        &self,
        formula: &str,
        vars: &RollVariables,
    ) -> Result<RollResult, CollaboratorError>;
}

/// New initiative for one combatant of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantUpdate {
    pub combatant: CombatantId,
    pub initiative: f64,
}

/// Persistence of actor sheets and encounter rosters.
///
/// Each call applies its whole batch atomically.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn apply_actor_updates(
        &self,
        actor: &ActorId,
        updates: &[ActorUpdate],
    ) -> Result<(), CollaboratorError>;

    async fn apply_combatant_updates(
        &self,
        encounter: &EncounterId,
        updates: &[CombatantUpdate],
    ) -> Result<(), CollaboratorError>;

    /// Current `clock` field of an actor sheet, if it has one.
    async fn actor_clock(&self, actor: &ActorId) -> Result<Option<f64>, CollaboratorError>;
}

/// Kind of a table notice.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeKind {
    RoundStart,
    Stagger,
    Break,
    StatusTriggered,
    StatusExpired,
    WeakPoint,
    Exhausted,
}

/// Human-readable message for the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Fire-and-forget delivery of [`Notice`]s.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice);
}
