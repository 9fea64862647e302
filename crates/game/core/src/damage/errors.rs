use crate::error::{ErrorSeverity, RulesError};
use crate::state::PartId;

/// Errors raised while resolving damage against a monster sheet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageError {
    /// The raw damage type is not listed on the part; callers must validate
    /// attack types against the sheet before applying damage.
    #[error("part '{part}' has no resistance entry for damage type '{damage_type}'")]
    MissingResistance { part: String, damage_type: String },

    #[error("monster has no part '{0}'")]
    UnknownPart(PartId),
}

impl RulesError for DamageError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingResistance { .. } => ErrorSeverity::Configuration,
            Self::UnknownPart(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingResistance { .. } => "MISSING_RESISTANCE",
            Self::UnknownPart(_) => "UNKNOWN_PART",
        }
    }
}
