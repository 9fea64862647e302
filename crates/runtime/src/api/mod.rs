//! Public runtime API surface.
//!
//! Types exposed to consumers of the runtime crate: collaborator traits the
//! host implements, handles for driving encounters and monsters, and the
//! unified error type.

pub mod collaborators;
pub mod errors;
pub mod handle;

pub use collaborators::{
    CombatantUpdate, DocumentStore, FormulaEvaluator, Notice, NoticeKind, Notifier, RollResult,
    RollVariables,
};
pub use errors::{CollaboratorError, Result, RuntimeError};
pub use handle::{EncounterHandle, MonsterHandle};
