//! Deterministic rules core for monster-hunting encounters.
//!
//! `hunt-core` holds the two state machines of the rules and the data they
//! act on. [`engine::CombatSequencer`] steps an encounter forward and back
//! through rounds and turns with exact undo, and the [`damage`] module turns
//! hits into part stagger/break, status buildup and damage log entries on a
//! [`MonsterActor`]. Everything here is synchronous and free of I/O; the
//! runtime crate wires it to dice, persistence and notifications.
pub mod attack;
pub mod config;
pub mod damage;
pub mod engine;
pub mod error;
pub mod state;

pub use attack::{
    AbilityScore, AttackError, AttackFormulas, AttackOptions, HunterStats, Sharpness,
    WeaponProfile,
};
pub use config::RulesConfig;
pub use damage::{
    DamageError, DamageEvent, Hit, HitOutcome, HunterHit, PartDamage, apply_damage,
    decay_status, feed_status, hunter_damage, round_half_up,
};
pub use engine::{
    ClockOracle, ClockUpdate, CombatError, CombatSequencer, EncounterPhase, HistoryEntry,
    InitiativeRecord, Rewind, RoundAdvance, TurnAdvance, TurnHistoryStack,
};
pub use error::{ErrorSeverity, RulesError};
pub use state::{
    ActorId, ActorUpdate, BreakDamageType, Combatant, CombatantId, DamageLog, DamageLogEntry,
    EncounterId, Faction, MonsterActor, Part, PartId, PartTemplate, Resistances, ResourceMeter,
    RoundTick, StatusTrack, StatusTrackSpec,
};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn sequencer_survives_a_json_round_trip() {
        let mut sequencer = CombatSequencer::with_combatants(
            RulesConfig::default(),
            [
                Combatant::hunter(1, "aiko", 0),
                Combatant::monster(2, "rathalos", 0),
            ],
        )
        .unwrap();
        sequencer.start().unwrap();
        sequencer.advance_round().unwrap();

        let json = serde_json::to_string(&sequencer).unwrap();
        let restored: CombatSequencer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, sequencer);
        assert_eq!(restored.history().len(), 2);
    }

    #[test]
    fn rules_config_fills_missing_fields_with_defaults() {
        let config: RulesConfig =
            serde_json::from_str(r#"{ "stamina_decay_interval": 5 }"#).unwrap();
        assert_eq!(config.stamina_decay_interval, 5);
        assert_eq!(config.status_limit_step, 50);
    }

    #[test]
    fn break_type_serializes_as_its_sheet_label() {
        let json = serde_json::to_string(&BreakDamageType::Any).unwrap();
        assert_eq!(json, r#""Any""#);
        let parsed: BreakDamageType = serde_json::from_str(r#""Ice""#).unwrap();
        assert_eq!(parsed, BreakDamageType::Only("Ice".to_owned()));
    }
}
