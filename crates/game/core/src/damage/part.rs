//! Single-part damage resolution.

use crate::config::RulesConfig;
use crate::state::Part;

use super::{DamageError, DamageEvent, round_half_up};

/// Result of resolving one hit against one part.
#[derive(Clone, Debug, PartialEq)]
pub struct PartDamage {
    /// Raw damage after resistance scaling.
    pub raw_damage: u32,
    /// Elemental damage after resistance scaling.
    pub element_damage: u32,
    pub raw_resist: f64,
    pub element_resist: f64,
    /// Stagger / break transitions, in the order they fired.
    pub events: Vec<DamageEvent>,
}

impl PartDamage {
    /// Total health the owning monster loses from this hit.
    pub fn health_reduction(&self) -> u32 {
        self.raw_damage.saturating_add(self.element_damage)
    }
}

/// Applies a hit to `part`, updating its stagger and break progress.
///
/// # Formula
///
/// ```text
/// raw_damage     = round(raw_amount * raw_resist * 0.1)
/// element_damage = round(elemental_amount * element_resist)
/// stagger       += raw_damage + element_damage
/// break         += raw_damage      if break type is Any or damage_type
/// break         += element_damage  if break type is element_type
/// ```
///
/// Both break contributions may apply in the same call. Crossing the stagger
/// limit resets stagger progress and counts a stagger; crossing the break
/// limit breaks the part once, after which break progress no longer fires.
///
/// The raw resistance must be listed on the part; a missing element
/// resistance counts as 1.
pub fn apply_damage(
    part: &mut Part,
    raw_amount: f64,
    elemental_amount: f64,
    damage_type: &str,
    element_type: &str,
    config: &RulesConfig,
) -> Result<PartDamage, DamageError> {
    let raw_resist =
        part.resistances
            .get(damage_type)
            .ok_or_else(|| DamageError::MissingResistance {
                part: part.name.clone(),
                damage_type: damage_type.to_owned(),
            })?;
    let element_resist = part.resistances.get_or_neutral(element_type);

    let raw_damage = round_half_up(raw_amount * raw_resist * config.raw_resistance_scale);
    let element_damage = round_half_up(elemental_amount * element_resist);

    part.stagger_damage = part
        .stagger_damage
        .saturating_add(raw_damage.saturating_add(element_damage));

    if part.break_damage_type.accepts_raw(damage_type) {
        part.break_damage = part.break_damage.saturating_add(raw_damage);
    }
    // Not exclusive with the raw branch: a break type naming the element
    // also collects element damage when damage_type == element_type.
    if part.break_damage_type.accepts_element(element_type) {
        part.break_damage = part.break_damage.saturating_add(element_damage);
    }

    let mut events = Vec::new();

    if part.stagger_damage >= part.stagger_limit {
        part.stagger_damage = 0;
        part.stagger_num += 1;
        tracing::info!(part = %part.name, count = part.stagger_num, "part staggered");
        events.push(DamageEvent::PartStaggered {
            part: part.name.clone(),
            stagger_num: part.stagger_num,
        });
    }

    if part.break_damage >= part.break_limit && part.break_num == 0 {
        part.break_damage = 0;
        part.break_num = 1;
        tracing::info!(part = %part.name, reward = %part.break_reward, "part broken");
        events.push(DamageEvent::PartBroken {
            part: part.name.clone(),
            reward: part.break_reward.clone(),
        });
    }

    tracing::debug!(
        part = %part.name,
        raw_damage,
        element_damage,
        stagger = part.stagger_damage,
        break_progress = part.break_damage,
        "part damage applied"
    );

    Ok(PartDamage {
        raw_damage,
        element_damage,
        raw_resist,
        element_resist,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BreakDamageType, PartTemplate, Resistances};

    fn part(
        resistances: Resistances,
        break_type: BreakDamageType,
        stagger_limit: u32,
        break_limit: u32,
    ) -> Part {
        let mut part = Part::from_template(
            PartTemplate {
                name: "Tail".to_owned(),
                resistances,
                break_damage_type: break_type,
                ..PartTemplate::default()
            },
            0,
        );
        part.stagger_limit = stagger_limit;
        part.break_limit = break_limit;
        part
    }

    #[test]
    fn slashing_hit_breaks_without_staggering() {
        let mut tail = part(
            Resistances::new().with("Slashing", 5.0),
            BreakDamageType::Only("Slashing".to_owned()),
            100,
            50,
        );

        let result = apply_damage(&mut tail, 100.0, 0.0, "Slashing", "N/A", &RulesConfig::default())
            .unwrap();

        assert_eq!(result.raw_damage, 50);
        assert_eq!(result.element_damage, 0);
        assert_eq!(result.health_reduction(), 50);
        assert_eq!(tail.stagger_damage, 50);
        assert_eq!(tail.stagger_num, 0);
        assert_eq!(tail.break_damage, 0);
        assert_eq!(tail.break_num, 1);
        assert_eq!(
            result.events,
            vec![DamageEvent::PartBroken {
                part: "Tail".to_owned(),
                reward: "none".to_owned()
            }]
        );
    }

    #[test]
    fn missing_raw_resistance_is_an_error() {
        let mut tail = part(
            Resistances::new().with("Slashing", 5.0),
            BreakDamageType::Any,
            100,
            50,
        );

        let err = apply_damage(&mut tail, 10.0, 0.0, "Blunt", "N/A", &RulesConfig::default())
            .unwrap_err();

        assert_eq!(
            err,
            DamageError::MissingResistance {
                part: "Tail".to_owned(),
                damage_type: "Blunt".to_owned()
            }
        );
        assert_eq!(tail.stagger_damage, 0);
    }

    #[test]
    fn missing_element_resistance_defaults_to_one() {
        let mut tail = part(
            Resistances::new().with("Blunt", 2.0),
            BreakDamageType::Any,
            1000,
            1000,
        );

        let result =
            apply_damage(&mut tail, 10.0, 7.4, "Blunt", "Fire", &RulesConfig::default()).unwrap();

        assert_eq!(result.raw_damage, 2);
        assert_eq!(result.element_damage, 7);
        assert_eq!(result.element_resist, 1.0);
        assert_eq!(tail.stagger_damage, 9);
        // Only raw damage counts towards an Any break type.
        assert_eq!(tail.break_damage, 2);
    }

    #[test]
    fn stagger_resets_and_counts() {
        let mut tail = part(
            Resistances::new().with("Blunt", 10.0),
            BreakDamageType::Only("Ice".to_owned()),
            30,
            1000,
        );
        let config = RulesConfig::default();

        apply_damage(&mut tail, 20.0, 0.0, "Blunt", "N/A", &config).unwrap();
        assert_eq!(tail.stagger_damage, 20);

        let result = apply_damage(&mut tail, 15.0, 0.0, "Blunt", "N/A", &config).unwrap();
        assert_eq!(tail.stagger_damage, 0);
        assert_eq!(tail.stagger_num, 1);
        assert!(matches!(
            result.events.as_slice(),
            [DamageEvent::PartStaggered { stagger_num: 1, .. }]
        ));
        assert_eq!(tail.break_damage, 0);
    }

    #[test]
    fn element_break_type_collects_only_element_damage() {
        let mut horn = part(
            Resistances::new().with("Piercing", 5.0).with("Ice", 2.0),
            BreakDamageType::Only("Ice".to_owned()),
            1000,
            1000,
        );

        apply_damage(&mut horn, 40.0, 5.0, "Piercing", "Ice", &RulesConfig::default()).unwrap();

        assert_eq!(horn.stagger_damage, 30);
        assert_eq!(horn.break_damage, 10);
    }

    #[test]
    fn matching_raw_and_element_types_count_twice_towards_break() {
        let mut horn = part(
            Resistances::new().with("Dragon", 10.0),
            BreakDamageType::Only("Dragon".to_owned()),
            1000,
            1000,
        );

        apply_damage(&mut horn, 10.0, 3.0, "Dragon", "Dragon", &RulesConfig::default()).unwrap();

        // raw 10*10*0.1 = 10, element 3*10 = 30; both feed the break track
        assert_eq!(horn.break_damage, 40);
    }

    #[test]
    fn break_fires_once() {
        let mut tail = part(
            Resistances::new().with("Slashing", 10.0),
            BreakDamageType::Any,
            10_000,
            10,
        );
        let config = RulesConfig::default();

        for _ in 0..5 {
            apply_damage(&mut tail, 20.0, 0.0, "Slashing", "N/A", &config).unwrap();
            assert!(tail.break_num <= 1);
        }

        assert_eq!(tail.break_num, 1);
        // Progress keeps accumulating after the break, without new events.
        assert_eq!(tail.break_damage, 80);
    }

    #[test]
    fn huge_hits_saturate_instead_of_overflowing() {
        let mut tail = part(
            Resistances::new().with("Slashing", 10.0),
            BreakDamageType::Any,
            u32::MAX,
            u32::MAX,
        );
        let config = RulesConfig::default();

        let result = apply_damage(&mut tail, 1e10, 1e10, "Slashing", "Fire", &config).unwrap();
        assert_eq!(result.raw_damage, u32::MAX);
        assert_eq!(result.health_reduction(), u32::MAX);
        assert_eq!(tail.stagger_num, 1);
        assert_eq!(tail.break_num, 1);

        tail.stagger_damage = u32::MAX - 1;
        apply_damage(&mut tail, 1e10, 0.0, "Slashing", "N/A", &config).unwrap();
        assert_eq!(tail.stagger_num, 2);
    }

    #[test]
    fn accumulators_never_decrease_without_a_reset() {
        let mut tail = part(
            Resistances::new().with("Blunt", 3.0),
            BreakDamageType::Any,
            97,
            61,
        );
        let config = RulesConfig::default();
        let amounts = [13.0, 0.0, 44.5, 7.0, 120.0, 2.0, 65.0, 31.0, 0.4, 99.0];

        for amount in amounts {
            let (stagger_before, break_before) = (tail.stagger_damage, tail.break_damage);
            let result = apply_damage(&mut tail, amount, 0.0, "Blunt", "N/A", &config).unwrap();

            let staggered = result
                .events
                .iter()
                .any(|e| matches!(e, DamageEvent::PartStaggered { .. }));
            let broke = result
                .events
                .iter()
                .any(|e| matches!(e, DamageEvent::PartBroken { .. }));
            if !staggered {
                assert!(tail.stagger_damage >= stagger_before);
            }
            if !broke {
                assert!(tail.break_damage >= break_before);
            }
        }
    }
}
