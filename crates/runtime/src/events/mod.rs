//! Topic-based event bus for runtime events.
//!
//! Workers publish every state change to a topic; consumers subscribe only
//! to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, MonsterEvent, RollEvent};
