/// State transitions produced while resolving a hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageEvent {
    /// Accumulated stagger damage crossed the part's stagger limit.
    PartStaggered { part: String, stagger_num: u32 },

    /// Accumulated break damage crossed the part's break limit (once per part).
    PartBroken { part: String, reward: String },

    /// A status track crossed its buildup threshold.
    StatusTriggered {
        status: String,
        num: u32,
        rounds: u32,
    },
}

impl DamageEvent {
    /// Short human-readable line for chat / notifications.
    pub fn describe(&self) -> String {
        match self {
            Self::PartStaggered { part, .. } => format!("Staggered {part}"),
            Self::PartBroken { part, .. } => format!("Broke {part}"),
            Self::StatusTriggered { status, rounds, .. } => {
                format!("Status {status} applied for {rounds} rounds")
            }
        }
    }
}
