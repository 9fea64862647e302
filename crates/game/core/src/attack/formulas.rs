//! Dice formulas for a hunter's weapon attack.

use crate::damage::Hit;

use super::{AttackError, Sharpness};

/// Value, bonus and temporary modifier of one hunter ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScore {
    pub value: i32,
    pub bonus: i32,
    pub temp: i32,
}

impl AbilityScore {
    pub fn new(value: i32, bonus: i32, temp: i32) -> Self {
        Self { value, bonus, temp }
    }

    pub fn total(&self) -> i32 {
        self.value.saturating_add(self.bonus).saturating_add(self.temp)
    }
}

/// Attack-relevant part of a hunter sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HunterStats {
    pub strength: AbilityScore,
    pub spirit: AbilityScore,
    pub sharpness: i32,
}

/// Weapon item data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub name: String,
    /// Faces of the weapon die (`8` rolls `d8`).
    pub die: u32,
    pub bonus: i32,
    pub element_type: String,
    pub element_formula: String,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, die: u32, bonus: i32) -> Self {
        Self {
            name: name.into(),
            die,
            bonus,
            element_type: Hit::NO_ELEMENT.to_owned(),
            element_formula: String::new(),
        }
    }

    pub fn with_element(
        mut self,
        element_type: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        self.element_type = element_type.into();
        self.element_formula = formula.into();
        self
    }

    pub fn has_element(&self) -> bool {
        self.element_type != Hit::NO_ELEMENT
    }
}

/// Per-attack choices from the attack card.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOptions {
    pub attack_name: Option<String>,
    /// Raw damage type (`Slashing`, `Blunt`, ...).
    pub attack_type: String,
    /// Flat damage added by the chosen attack.
    pub attack_damage: Option<i32>,
}

impl AttackOptions {
    pub fn new(attack_type: impl Into<String>) -> Self {
        Self {
            attack_type: attack_type.into(),
            ..Self::default()
        }
    }

    pub fn with_attack_damage(mut self, damage: i32) -> Self {
        self.attack_damage = Some(damage);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.attack_name = Some(name.into());
        self
    }
}

/// Formulas to hand to a dice evaluator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackFormulas {
    pub damage: String,
    pub element: String,
    pub hit: String,
    pub sharpness: Sharpness,
    /// Red sharpness: the raw part of the attack glances off.
    pub bounced: bool,
    pub damage_type: String,
    pub element_type: String,
}

impl AttackFormulas {
    pub const HIT_FORMULA: &'static str = "1d20";
    pub const ZERO: &'static str = "0";

    /// Builds the damage, element and hit formulas for `weapon`.
    ///
    /// ```text
    /// damage  = <band>d<die> + str.total + weapon.bonus [+ attack_damage]
    /// element = <element formula> + spr.value + str.bonus + str.temp
    /// hit     = 1d20
    /// ```
    pub fn for_weapon(
        weapon: &WeaponProfile,
        hunter: &HunterStats,
        options: &AttackOptions,
    ) -> Result<Self, AttackError> {
        let sharpness = Sharpness::from_value(hunter.sharpness)
            .ok_or(AttackError::SharpnessOutOfRange(hunter.sharpness))?;

        let damage = match sharpness.dice() {
            Some(count) => {
                let mut formula = format!("{count}d{}", weapon.die);
                push_term(&mut formula, hunter.strength.total());
                push_term(&mut formula, weapon.bonus);
                if let Some(extra) = options.attack_damage {
                    push_term(&mut formula, extra);
                }
                formula
            }
            None => Self::ZERO.to_owned(),
        };

        let element = if weapon.has_element() {
            let mut formula = weapon.element_formula.clone();
            push_term(
                &mut formula,
                hunter
                    .spirit
                    .value
                    .saturating_add(hunter.strength.bonus)
                    .saturating_add(hunter.strength.temp),
            );
            formula
        } else {
            Self::ZERO.to_owned()
        };

        Ok(Self {
            damage,
            element,
            hit: Self::HIT_FORMULA.to_owned(),
            sharpness,
            bounced: sharpness.bounces(),
            damage_type: options.attack_type.clone(),
            element_type: weapon.element_type.clone(),
        })
    }
}

fn push_term(formula: &mut String, term: i32) {
    if formula.is_empty() {
        formula.push_str(&term.to_string());
    } else if term < 0 {
        formula.push_str(&format!("-{}", term.unsigned_abs()));
    } else {
        formula.push_str(&format!("+{term}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunter(sharpness: i32) -> HunterStats {
        HunterStats {
            strength: AbilityScore::new(3, 1, 1),
            spirit: AbilityScore::new(2, 0, 0),
            sharpness,
        }
    }

    #[test]
    fn green_sharpness_rolls_three_weapon_dice() {
        let weapon = WeaponProfile::new("Iron Sword", 8, 2).with_element("Fire", "1d4");
        let options = AttackOptions::new("Slashing").with_attack_damage(4);

        let formulas = AttackFormulas::for_weapon(&weapon, &hunter(55), &options).unwrap();

        assert_eq!(formulas.damage, "3d8+5+2+4");
        assert_eq!(formulas.element, "1d4+4");
        assert_eq!(formulas.hit, "1d20");
        assert_eq!(formulas.sharpness, Sharpness::Green);
        assert!(!formulas.bounced);
        assert_eq!(formulas.damage_type, "Slashing");
        assert_eq!(formulas.element_type, "Fire");
    }

    #[test]
    fn weapon_without_element_rolls_zero() {
        let weapon = WeaponProfile::new("Bone Hammer", 10, -1);
        let formulas =
            AttackFormulas::for_weapon(&weapon, &hunter(90), &AttackOptions::new("Blunt")).unwrap();

        assert_eq!(formulas.damage, "6d10+5-1");
        assert_eq!(formulas.element, "0");
    }

    #[test]
    fn red_sharpness_bounces() {
        let weapon = WeaponProfile::new("Dull Blade", 6, 0);
        let formulas =
            AttackFormulas::for_weapon(&weapon, &hunter(10), &AttackOptions::new("Slashing"))
                .unwrap();

        assert!(formulas.bounced);
        assert_eq!(formulas.damage, "0");
        assert_eq!(formulas.sharpness, Sharpness::Red);
    }

    #[test]
    fn sharpness_outside_every_band_is_rejected() {
        let weapon = WeaponProfile::new("Broken", 6, 0);
        let err = AttackFormulas::for_weapon(&weapon, &hunter(250), &AttackOptions::default())
            .unwrap_err();
        assert_eq!(err, AttackError::SharpnessOutOfRange(250));
    }
}
