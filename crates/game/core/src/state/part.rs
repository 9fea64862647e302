//! Damageable body parts of a monster.

use std::collections::HashMap;

use crate::damage::round_half_up;

/// Damage-type → multiplier table of one part.
///
/// Raw damage types must be listed explicitly; element types that are not
/// listed resist with a multiplier of 1.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Resistances(HashMap<String, f64>);

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, damage_type: impl Into<String>, multiplier: f64) -> Self {
        self.0.insert(damage_type.into(), multiplier);
        self
    }

    pub fn set(&mut self, damage_type: impl Into<String>, multiplier: f64) {
        self.0.insert(damage_type.into(), multiplier);
    }

    /// Exact lookup; `None` when the type is not listed.
    pub fn get(&self, damage_type: &str) -> Option<f64> {
        self.0.get(damage_type).copied()
    }

    /// Lookup that treats unlisted types as neutral.
    pub fn get_or_neutral(&self, damage_type: &str) -> f64 {
        self.get(damage_type).unwrap_or(1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Resistances {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Which damage feeds a part's break accumulator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum BreakDamageType {
    /// Raw damage of every type counts.
    #[default]
    Any,
    /// Only this raw type or element counts.
    Only(String),
}

impl BreakDamageType {
    pub const ANY_LABEL: &'static str = "Any";

    /// Parses the sheet label; `"Any"` is the wildcard.
    pub fn from_label(label: &str) -> Self {
        if label == Self::ANY_LABEL {
            Self::Any
        } else {
            Self::Only(label.to_owned())
        }
    }

    /// True when raw damage of `damage_type` feeds the break accumulator.
    pub fn accepts_raw(&self, damage_type: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(kind) => kind == damage_type,
        }
    }

    /// True when elemental damage of `element_type` feeds the break accumulator.
    pub fn accepts_element(&self, element_type: &str) -> bool {
        matches!(self, Self::Only(kind) if kind == element_type)
    }
}

impl From<String> for BreakDamageType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<BreakDamageType> for String {
    fn from(kind: BreakDamageType) -> Self {
        match kind {
            BreakDamageType::Any => BreakDamageType::ANY_LABEL.to_owned(),
            BreakDamageType::Only(label) => label,
        }
    }
}

/// Authoring data for a part; limits are derived from the owner's max health.
///
/// Fields left out of a data file take the stock "Body" values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PartTemplate {
    pub name: String,
    pub resistances: Resistances,
    /// Percentage of max health needed to stagger.
    pub stagger_percent: f64,
    /// Percentage of max health needed to break.
    pub break_percent: f64,
    pub break_damage_type: BreakDamageType,
    /// Flavour of the stagger reaction ("flinch", "topple", ...).
    pub stagger_kind: String,
    /// Carve reward granted on break.
    pub break_reward: String,
}

impl Default for PartTemplate {
    fn default() -> Self {
        let resistances = [
            ("Slashing", 5.0),
            ("Blunt", 5.0),
            ("Explosive", 5.0),
            ("Piercing", 5.0),
            ("Sonic", 5.0),
            ("Water", 1.0),
            ("Fire", 1.0),
            ("Lightning", 1.0),
            ("Ice", 1.0),
            ("Dragon", 1.0),
        ]
        .into_iter()
        .collect();

        Self {
            name: "Body".to_owned(),
            resistances,
            stagger_percent: 8.0,
            break_percent: 10.0,
            break_damage_type: BreakDamageType::Any,
            stagger_kind: "flinch".to_owned(),
            break_reward: "none".to_owned(),
        }
    }
}

/// A damageable region of a monster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    pub name: String,
    pub resistances: Resistances,
    pub stagger_percent: f64,
    pub break_percent: f64,
    pub stagger_limit: u32,
    pub break_limit: u32,
    pub stagger_damage: u32,
    pub break_damage: u32,
    pub stagger_num: u32,
    /// 0 or 1; break is single-shot.
    pub break_num: u8,
    pub break_damage_type: BreakDamageType,
    pub stagger_kind: String,
    pub break_reward: String,
}

impl Part {
    /// Builds a fresh part, deriving limits from the owner's max health.
    pub fn from_template(template: PartTemplate, max_health: u32) -> Self {
        let mut part = Self {
            name: template.name,
            resistances: template.resistances,
            stagger_percent: template.stagger_percent,
            break_percent: template.break_percent,
            stagger_limit: 0,
            break_limit: 0,
            stagger_damage: 0,
            break_damage: 0,
            stagger_num: 0,
            break_num: 0,
            break_damage_type: template.break_damage_type,
            stagger_kind: template.stagger_kind,
            break_reward: template.break_reward,
        };
        part.recalculate_limits(max_health);
        part
    }

    /// Re-derives `stagger_limit` / `break_limit` from `max_health`.
    pub fn recalculate_limits(&mut self, max_health: u32) {
        self.stagger_limit = percent_of(max_health, self.stagger_percent);
        self.break_limit = percent_of(max_health, self.break_percent);
    }

    pub fn is_broken(&self) -> bool {
        self.break_num > 0
    }

    /// Clears break progress so the part can break again (new hunt, repaired part).
    pub fn reset_break(&mut self) {
        self.break_damage = 0;
        self.break_num = 0;
    }
}

fn percent_of(max_health: u32, percent: f64) -> u32 {
    round_half_up(f64::from(max_health) * percent * 0.01)
}
