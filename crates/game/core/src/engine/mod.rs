//! Encounter sequencing: round/turn bookkeeping with full undo.
//!
//! [`CombatSequencer`] owns the roster of one encounter together with its
//! [`TurnHistoryStack`]. Forward operations push what they overwrite before
//! changing anything, so every advance can be rewound exactly; the
//! sequencer never touches host documents and instead reports
//! [`ClockUpdate`]s and [`InitiativeRecord`]s for the caller to persist.

mod errors;
mod history;
mod ordering;
mod roster;
mod turns;

use std::collections::HashMap;

pub use errors::CombatError;
pub use history::{HistoryEntry, InitiativeRecord, TurnHistoryStack};
pub use ordering::{compare_combatants, sort_turn_order};

use crate::config::RulesConfig;
use crate::state::{ActorId, Combatant, CombatantId};

/// Lifecycle of an encounter.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncounterPhase {
    #[default]
    NotStarted,
    InProgress,
    Ended,
}

/// Read access to the `clock` field of actor sheets.
///
/// `None` means the actor has no readable clock; the sequencer then leaves
/// the combatant's initiative untouched.
pub trait ClockOracle {
    fn clock(&self, actor: &ActorId) -> Option<f64>;
}

impl ClockOracle for HashMap<ActorId, f64> {
    fn clock(&self, actor: &ActorId) -> Option<f64> {
        self.get(actor).copied()
    }
}

impl<F> ClockOracle for F
where
    F: Fn(&ActorId) -> Option<f64>,
{
    fn clock(&self, actor: &ActorId) -> Option<f64> {
        self(actor)
    }
}

/// Initiative written from an actor clock at the end of its turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockUpdate {
    pub combatant: CombatantId,
    pub actor: ActorId,
    /// Clock value after clamping at zero.
    pub clock: f64,
}

/// A round boundary crossed going forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundAdvance {
    /// The round just entered.
    pub round: u32,
    /// Entering this round also costs every hunter one stamina modifier.
    pub stamina_decay: bool,
}

impl RoundAdvance {
    /// Table message announced when the round starts.
    pub fn notice(&self) -> String {
        if self.stamina_decay {
            format!("Round {}: +1 Stamina, -1 Stamina Mod", self.round)
        } else {
            format!("Round {}: +1 Stamina", self.round)
        }
    }
}

/// Result of [`CombatSequencer::advance_turn`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnAdvance {
    /// Combatant whose turn just ended.
    pub ended: CombatantId,
    pub clock_update: Option<ClockUpdate>,
    /// Set when ending this turn wrapped into a new round.
    pub new_round: Option<RoundAdvance>,
    pub round: u32,
    pub turn: usize,
}

/// Result of a retreat operation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rewind {
    /// History was empty; nothing changed.
    AtStart,
    /// One combatant's initiative was restored.
    Turn { restored: InitiativeRecord },
    /// A whole round was undone and every listed initiative restored.
    Round {
        round: u32,
        restored: Vec<InitiativeRecord>,
    },
}

impl Rewind {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::AtStart)
    }

    /// Initiatives that must be written back to the host.
    pub fn restored(&self) -> &[InitiativeRecord] {
        match self {
            Self::AtStart => &[],
            Self::Turn { restored } => std::slice::from_ref(restored),
            Self::Round { restored, .. } => restored,
        }
    }
}

/// Round and turn state machine for a single encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSequencer {
    phase: EncounterPhase,
    round: u32,
    turn: usize,
    combatants: Vec<Combatant>,
    history: TurnHistoryStack,
    config: RulesConfig,
}

impl CombatSequencer {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            phase: EncounterPhase::NotStarted,
            round: 0,
            turn: 0,
            combatants: Vec::new(),
            history: TurnHistoryStack::new(),
            config,
        }
    }

    /// Builds an encounter with an initial roster, already in turn order.
    pub fn with_combatants(
        config: RulesConfig,
        combatants: impl IntoIterator<Item = Combatant>,
    ) -> Result<Self, CombatError> {
        let mut sequencer = Self::new(config);
        for combatant in combatants {
            sequencer.add_combatant(combatant)?;
        }
        Ok(sequencer)
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Index of the active combatant in [`Self::combatants`].
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Roster in turn order.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn history(&self) -> &TurnHistoryStack {
        &self.history
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Current initiative of every combatant, in turn order.
    pub fn initiatives(&self) -> Vec<InitiativeRecord> {
        self.combatants.iter().map(record_of).collect()
    }

    fn require_in_progress(&self, operation: &'static str) -> Result<(), CombatError> {
        if self.phase == EncounterPhase::InProgress {
            Ok(())
        } else {
            Err(CombatError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    fn restore(&mut self, record: &InitiativeRecord) {
        match self
            .combatants
            .iter_mut()
            .find(|c| c.id == record.combatant)
        {
            Some(combatant) => combatant.initiative = record.initiative,
            None => tracing::debug!(
                combatant = %record.combatant,
                "skipping restore for a combatant no longer in the encounter"
            ),
        }
    }
}

impl Default for CombatSequencer {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

fn record_of(combatant: &Combatant) -> InitiativeRecord {
    InitiativeRecord {
        combatant: combatant.id,
        initiative: combatant.initiative,
    }
}
