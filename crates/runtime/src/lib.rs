//! Async runtime around the hunt rules core.
//!
//! Each encounter and each monster sheet is owned by a background worker;
//! clients drive them through cloneable handles and observe the results on
//! a topic-based event bus. Dice rolling, document persistence and chat
//! notices are host collaborators injected through traits.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`roll`] turns weapon profiles into evaluated attack rolls
//! - [`providers`] and [`repository`] ship default collaborator implementations
pub mod api;
pub mod events;
pub mod providers;
pub mod repository;
pub mod roll;
pub mod runtime;

mod workers;

pub use api::{
    CollaboratorError, CombatantUpdate, DocumentStore, EncounterHandle, FormulaEvaluator,
    MonsterHandle, Notice, NoticeKind, Notifier, Result, RollResult, RollVariables, RuntimeError,
};
pub use events::{CombatEvent, Event, EventBus, MonsterEvent, RollEvent, Topic};
pub use providers::{DiceEvaluator, TracingNotifier};
pub use repository::InMemoryDocumentStore;
pub use roll::{AttackRoll, AttackRoller};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::MonsterAttack;
