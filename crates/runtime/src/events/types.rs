//! Event types for different topics.

use serde::{Deserialize, Serialize};

use hunt_core::{
    ActorId, Combatant, CombatantId, EncounterId, HitOutcome, Rewind, RoundAdvance, RoundTick,
    TurnAdvance,
};

use crate::roll::AttackRoll;

/// Encounter sequencing events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        encounter: EncounterId,
    },
    TurnAdvanced {
        encounter: EncounterId,
        advance: TurnAdvance,
    },
    /// Also published when a turn advance wraps into a new round.
    RoundStarted {
        encounter: EncounterId,
        round: RoundAdvance,
    },
    Rewound {
        encounter: EncounterId,
        rewind: Rewind,
    },
    CombatantAdded {
        encounter: EncounterId,
        combatant: Combatant,
    },
    CombatantRemoved {
        encounter: EncounterId,
        combatant: CombatantId,
    },
    Ended {
        encounter: EncounterId,
    },
}

/// Monster sheet events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MonsterEvent {
    HitResolved {
        monster: ActorId,
        attacker: String,
        outcome: HitOutcome,
    },
    RoundTicked {
        monster: ActorId,
        tick: RoundTick,
    },
    AttackCommitted {
        monster: ActorId,
        damage: u32,
        stamina: u32,
        exhausted: bool,
    },
}

/// Dice events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RollEvent {
    AttackRolled { attacker: String, roll: AttackRoll },
}
