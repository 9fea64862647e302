//! Whole-hit resolution against a monster sheet, and hunter damage.

use crate::config::RulesConfig;
use crate::state::{ActorUpdate, MonsterActor, PartId};

use super::{DamageError, DamageEvent, apply_damage, feed_status, round_half_up};

/// An attack landing on a monster part, as carried by an attack card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    /// Name the damage log files this hit under.
    pub attacker: String,
    pub part: PartId,
    pub raw_amount: f64,
    pub elemental_amount: f64,
    pub damage_type: String,
    pub element_type: String,
    /// Card multiplier (half / normal / critical buttons).
    pub modifier: f64,
    pub extra_raw: f64,
    pub extra_elemental: f64,
}

impl Hit {
    /// Element label of attacks without an element.
    pub const NO_ELEMENT: &'static str = "N/A";

    pub fn new(
        attacker: impl Into<String>,
        part: impl Into<PartId>,
        damage_type: impl Into<String>,
        raw_amount: f64,
    ) -> Self {
        Self {
            attacker: attacker.into(),
            part: part.into(),
            raw_amount,
            elemental_amount: 0.0,
            damage_type: damage_type.into(),
            element_type: Self::NO_ELEMENT.to_owned(),
            modifier: 1.0,
            extra_raw: 0.0,
            extra_elemental: 0.0,
        }
    }

    pub fn with_element(mut self, element_type: impl Into<String>, amount: f64) -> Self {
        self.element_type = element_type.into();
        self.elemental_amount = amount;
        self
    }

    pub fn with_modifier(mut self, modifier: f64) -> Self {
        self.modifier = modifier;
        self
    }

    /// Additional raw / elemental damage entered when applying the card.
    pub fn with_extra(mut self, raw: f64, elemental: f64) -> Self {
        self.extra_raw = raw;
        self.extra_elemental = elemental;
        self
    }

    pub fn has_element(&self) -> bool {
        self.element_type != Self::NO_ELEMENT
    }

    /// `(raw, elemental)` amounts after extras and the card multiplier.
    pub fn scaled_amounts(&self) -> (f64, f64) {
        (
            (self.raw_amount + self.extra_raw) * self.modifier,
            (self.elemental_amount + self.extra_elemental) * self.modifier,
        )
    }
}

/// Everything a hit changed on the monster sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitOutcome {
    pub part: PartId,
    pub raw_damage: u32,
    pub element_damage: u32,
    /// Health removed (before clamping at zero).
    pub total: u32,
    pub health: u32,
    /// Hit landed on a soft spot (high raw or element multiplier).
    pub weak_point: bool,
    pub events: Vec<DamageEvent>,
    /// Typed sheet updates to persist, in application order.
    pub updates: Vec<ActorUpdate>,
}

impl MonsterActor {
    /// Resolves a hit: part damage, status buildup, health, damage log.
    ///
    /// Nothing on the sheet changes when the part or raw resistance is missing.
    pub fn take_hit(&mut self, hit: &Hit, config: &RulesConfig) -> Result<HitOutcome, DamageError> {
        let (raw_amount, elemental_amount) = hit.scaled_amounts();

        let part = self
            .parts
            .get_mut(&hit.part)
            .ok_or_else(|| DamageError::UnknownPart(hit.part.clone()))?;

        let damage = apply_damage(
            part,
            raw_amount,
            elemental_amount,
            &hit.damage_type,
            &hit.element_type,
            config,
        )?;

        let weak_point = damage.element_resist > config.weak_point_element_threshold
            || damage.raw_resist > config.weak_point_raw_threshold;

        let mut events = damage.events.clone();
        let mut updates = vec![ActorUpdate::Part {
            part: hit.part.clone(),
            state: part.clone(),
        }];

        if hit.has_element() {
            let key = hit.element_type.to_lowercase();
            if let Some(track) = self.statuses.get_mut(&key) {
                if let Some(event) =
                    feed_status(&key, track, damage.element_damage, config.status_limit_step)
                {
                    events.push(event);
                }
                updates.push(ActorUpdate::Status {
                    status: key,
                    state: track.clone(),
                });
            }
        }

        let total = damage.health_reduction();
        let health = self.health.deplete(total);
        updates.push(ActorUpdate::Health(health));

        let entry = self.damage_log.record(&hit.attacker, total).clone();
        updates.push(ActorUpdate::DamageLog {
            attacker: hit.attacker.clone(),
            entry,
        });

        tracing::debug!(
            monster = %self.id,
            attacker = %hit.attacker,
            part = %hit.part,
            total,
            health,
            "hit resolved"
        );

        Ok(HitOutcome {
            part: hit.part.clone(),
            raw_damage: damage.raw_damage,
            element_damage: damage.element_damage,
            total,
            health,
            weak_point,
            events,
            updates,
        })
    }
}

/// Result of a monster attack landing on a hunter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HunterHit {
    pub damage: u32,
    pub health: u32,
}

/// Hunters subtract their flat resistance from the scaled raw damage.
///
/// A resistance larger than the hit absorbs it fully; it never heals.
pub fn hunter_damage(raw: f64, modifier: f64, resistance: f64, health: u32) -> HunterHit {
    let damage = round_half_up(raw * modifier - resistance);
    HunterHit {
        damage,
        health: health.saturating_sub(damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, PartTemplate, StatusTrackSpec};

    fn rathalos() -> MonsterActor {
        MonsterActor::new(ActorId::new("rathalos"), "Rathalos", 500, 30)
            .with_part("Part0", PartTemplate::default())
            .with_status(
                "Fire",
                StatusTrackSpec {
                    initial_res: 1,
                    next_res: 1,
                    max_res: 3,
                    effectivity: 2,
                    degradation: 5,
                },
            )
    }

    #[test]
    fn hit_updates_part_status_health_and_log() {
        let mut monster = rathalos();
        let hit = Hit::new("Aiko", "Part0", "Slashing", 30.0).with_element("Fire", 12.0);

        let outcome = monster.take_hit(&hit, &RulesConfig::default()).unwrap();

        // raw: 30 * 5 * 0.1 = 15, element: 12 * 1 = 12
        assert_eq!(outcome.raw_damage, 15);
        assert_eq!(outcome.element_damage, 12);
        assert_eq!(outcome.total, 27);
        assert_eq!(outcome.health, 473);
        assert!(outcome.weak_point);
        assert_eq!(monster.health.current, 473);
        assert_eq!(monster.status("fire").unwrap().value, 12);
        assert_eq!(monster.damage_log.entry("Aiko").unwrap().total, 27);
        assert!(matches!(outcome.updates[0], ActorUpdate::Part { .. }));
        assert!(matches!(outcome.updates[1], ActorUpdate::Status { .. }));
        assert_eq!(outcome.updates[2], ActorUpdate::Health(473));
    }

    #[test]
    fn modifier_and_extras_scale_amounts() {
        let hit = Hit::new("Aiko", "Part0", "Blunt", 20.0)
            .with_element("Ice", 4.0)
            .with_extra(10.0, 1.0)
            .with_modifier(1.5);

        assert_eq!(hit.scaled_amounts(), (45.0, 7.5));
    }

    #[test]
    fn status_trigger_is_reported() {
        let mut monster = rathalos();
        let hit = Hit::new("Bram", "Part0", "Blunt", 0.0).with_element("FIRE", 55.0);

        let outcome = monster.take_hit(&hit, &RulesConfig::default()).unwrap();

        assert!(outcome.events.contains(&DamageEvent::StatusTriggered {
            status: "fire".to_owned(),
            num: 1,
            rounds: 6
        }));
        assert_eq!(monster.status("fire").unwrap().current_limit, 100);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut monster = rathalos();
        monster.health.current = 10;

        let outcome = monster
            .take_hit(
                &Hit::new("Aiko", "Part0", "Slashing", 100.0),
                &RulesConfig::default(),
            )
            .unwrap();

        assert_eq!(outcome.total, 50);
        assert_eq!(outcome.health, 0);
        assert!(monster.is_defeated());
    }

    #[test]
    fn unknown_part_leaves_sheet_untouched() {
        let mut monster = rathalos();
        let before = monster.clone();

        let err = monster
            .take_hit(
                &Hit::new("Aiko", "Part9", "Slashing", 10.0),
                &RulesConfig::default(),
            )
            .unwrap_err();

        assert_eq!(err, DamageError::UnknownPart(PartId::new("Part9")));
        assert_eq!(monster, before);
    }

    #[test]
    fn hunter_resistance_absorbs_but_never_heals() {
        assert_eq!(
            hunter_damage(20.0, 1.5, 5.0, 100),
            HunterHit {
                damage: 25,
                health: 75
            }
        );
        assert_eq!(
            hunter_damage(4.0, 1.0, 10.0, 100),
            HunterHit {
                damage: 0,
                health: 100
            }
        );
        assert_eq!(hunter_damage(500.0, 1.0, 0.0, 100).health, 0);
    }
}
