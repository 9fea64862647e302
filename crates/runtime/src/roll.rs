//! Weapon attack rolling.
//!
//! [`AttackRoller`] turns a weapon, a hunter sheet and the attack card
//! choices into three evaluated rolls (hit, damage, element) and a ready
//! [`Hit`] payload for the targeted monster.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hunt_core::{AttackFormulas, AttackOptions, Hit, HunterStats, PartId, WeaponProfile};

use crate::api::{FormulaEvaluator, Result, RollResult, RollVariables};
use crate::events::{EventBus, RollEvent};

/// Evaluated attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub attacker: String,
    pub formulas: AttackFormulas,
    pub hit: RollResult,
    pub damage: RollResult,
    pub element: RollResult,
}

impl AttackRoll {
    pub fn hit_total(&self) -> f64 {
        round_cents(self.hit.total)
    }

    pub fn damage_total(&self) -> f64 {
        round_cents(self.damage.total)
    }

    pub fn element_total(&self) -> f64 {
        round_cents(self.element.total)
    }

    /// Damage payload for applying this attack to `part`.
    pub fn to_hit(&self, part: impl Into<PartId>) -> Hit {
        Hit::new(
            self.attacker.clone(),
            part,
            self.formulas.damage_type.clone(),
            self.damage_total(),
        )
        .with_element(self.formulas.element_type.clone(), self.element_total())
    }
}

/// Totals are shown and applied with two decimals.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rolls weapon attacks through the injected [`FormulaEvaluator`].
#[derive(Clone)]
pub struct AttackRoller {
    evaluator: Arc<dyn FormulaEvaluator>,
    event_bus: EventBus,
}

impl AttackRoller {
    pub fn new(evaluator: Arc<dyn FormulaEvaluator>, event_bus: EventBus) -> Self {
        Self {
            evaluator,
            event_bus,
        }
    }

    pub async fn roll(
        &self,
        attacker: &str,
        weapon: &WeaponProfile,
        hunter: &HunterStats,
        options: &AttackOptions,
    ) -> Result<AttackRoll> {
        let formulas = AttackFormulas::for_weapon(weapon, hunter, options)?;
        let vars = roll_variables(weapon, hunter);

        let hit = self.evaluator.evaluate(&formulas.hit, &vars).await?;
        let damage = self.evaluator.evaluate(&formulas.damage, &vars).await?;
        let element = self.evaluator.evaluate(&formulas.element, &vars).await?;

        let roll = AttackRoll {
            attacker: attacker.to_owned(),
            formulas,
            hit,
            damage,
            element,
        };

        tracing::info!(
            attacker,
            weapon = %weapon.name,
            hit = roll.hit_total(),
            damage = roll.damage_total(),
            element = roll.element_total(),
            bounced = roll.formulas.bounced,
            "attack rolled"
        );
        self.event_bus.publish(RollEvent::AttackRolled {
            attacker: attacker.to_owned(),
            roll: roll.clone(),
        });

        Ok(roll)
    }
}

fn roll_variables(weapon: &WeaponProfile, hunter: &HunterStats) -> RollVariables {
    RollVariables::from([
        ("str".to_owned(), f64::from(hunter.strength.total())),
        ("spr".to_owned(), f64::from(hunter.spirit.total())),
        ("sharpness".to_owned(), f64::from(hunter.sharpness)),
        ("die".to_owned(), f64::from(weapon.die)),
        ("bonus".to_owned(), f64::from(weapon.bonus)),
    ])
}
