use super::ids::{ActorId, CombatantId};

/// Which side controls a combatant.
///
/// Hunters always act before monsters within a round.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Player-controlled hunter ("character" sheets).
    Player,
    /// GM-controlled monster ("npc" sheets).
    Monster,
}

/// Participant in an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    /// Sheet whose `clock` field feeds this combatant's initiative.
    pub actor: ActorId,
    pub faction: Faction,
    /// Current clock value, informational only (never used for ordering).
    pub initiative: f64,
    /// Stable tie-break key within a faction (token insertion order).
    pub token_order: u32,
    pub hidden: bool,
    pub defeated: bool,
}

impl Combatant {
    pub fn new(id: CombatantId, actor: ActorId, faction: Faction, token_order: u32) -> Self {
        Self {
            id,
            actor,
            faction,
            initiative: 0.0,
            token_order,
            hidden: false,
            defeated: false,
        }
    }

    pub fn hunter(id: u32, actor: impl Into<String>, token_order: u32) -> Self {
        Self::new(
            CombatantId(id),
            ActorId(actor.into()),
            Faction::Player,
            token_order,
        )
    }

    pub fn monster(id: u32, actor: impl Into<String>, token_order: u32) -> Self {
        Self::new(
            CombatantId(id),
            ActorId(actor.into()),
            Faction::Monster,
            token_order,
        )
    }

    pub fn with_initiative(mut self, initiative: f64) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn is_player(&self) -> bool {
        self.faction == Faction::Player
    }
}
