//! Sheet and encounter state representation.
//!
//! This module owns the typed records the engines mutate: combatants in an
//! encounter, and the monster sheet with its parts, status tracks and damage
//! log. Host adapters translate their documents into these types and persist
//! the typed updates the engines report; nothing here knows about dotted
//! document paths.
pub mod combatant;
pub mod damage_log;
pub mod ids;
pub mod monster;
pub mod part;
pub mod status;

pub use combatant::{Combatant, Faction};
pub use damage_log::{DamageLog, DamageLogEntry};
pub use ids::{ActorId, CombatantId, EncounterId, PartId};
pub use monster::{ActorUpdate, MonsterActor, ResourceMeter, RoundTick};
pub use part::{BreakDamageType, Part, PartTemplate, Resistances};
pub use status::{StatusTrack, StatusTrackSpec};
