//! Worker tasks that own rules state.
//!
//! One worker per encounter and one per monster sheet. Each drains its
//! command queue one message at a time, so operations on the same entity
//! never interleave even while a collaborator call is pending.

mod encounter;
mod monster;

pub use encounter::{EncounterCommand, EncounterWorker};
pub use monster::{MonsterAttack, MonsterCommand, MonsterWorker};
