//! Weapon attack formulas for hunters.
//!
//! Dice are never rolled here; [`AttackFormulas`] only produces the formula
//! strings a dice evaluator understands.

mod formulas;
mod sharpness;

pub use formulas::{AbilityScore, AttackFormulas, AttackOptions, HunterStats, WeaponProfile};
pub use sharpness::Sharpness;

use crate::error::{ErrorSeverity, RulesError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("sharpness {0} is outside every sharpness band")]
    SharpnessOutOfRange(i32),
}

impl RulesError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SharpnessOutOfRange(_) => "SHARPNESS_OUT_OF_RANGE",
        }
    }
}
