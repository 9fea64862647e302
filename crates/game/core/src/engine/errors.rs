//! Error types for encounter sequencing.

use crate::error::{ErrorSeverity, RulesError};
use crate::state::CombatantId;

use super::EncounterPhase;

/// Errors surfaced by [`CombatSequencer`](super::CombatSequencer).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("cannot {operation} while the encounter is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: EncounterPhase,
    },

    #[error("encounter has no combatants")]
    NoCombatants,

    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is already part of this encounter")]
    DuplicateCombatant(CombatantId),

    #[error("turn history has no round snapshot to rewind round {round}")]
    HistoryOutOfSync { round: u32 },
}

impl RulesError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidState { .. }
            | Self::NoCombatants
            | Self::UnknownCombatant(_)
            | Self::DuplicateCombatant(_) => ErrorSeverity::Validation,
            Self::HistoryOutOfSync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::NoCombatants => "NO_COMBATANTS",
            Self::UnknownCombatant(_) => "UNKNOWN_COMBATANT",
            Self::DuplicateCombatant(_) => "DUPLICATE_COMBATANT",
            Self::HistoryOutOfSync { .. } => "HISTORY_OUT_OF_SYNC",
        }
    }
}
