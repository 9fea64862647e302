//! Unified error types surfaced by the runtime API.
//!
//! Rules violations from `hunt-core` keep their own variants so callers can
//! tell caller misuse, sheet misconfiguration and collaborator outages apart.
use thiserror::Error;
use tokio::sync::oneshot;

use hunt_core::{ActorId, AttackError, CombatError, DamageError, EncounterId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Damage(#[from] DamageError),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("encounter {0} is already running")]
    DuplicateEncounter(EncounterId),

    #[error("monster {0} is already running")]
    DuplicateMonster(ActorId),

    #[error("worker command channel closed")]
    CommandChannelClosed,

    #[error("worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Failures reported by host collaborators.
///
/// These pass through opaquely; the runtime never retries them.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("cannot evaluate formula `{formula}`: {reason}")]
    Formula { formula: String, reason: String },

    #[error("document store lock was poisoned")]
    LockPoisoned,

    #[error("document store rejected update: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
