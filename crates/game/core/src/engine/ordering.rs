//! Turn order within a round.
//!
//! Hunters act before monsters; within a faction the token insertion order
//! decides. The clock value is tracked for display only and is deliberately
//! not part of the comparison.

use std::cmp::Ordering;

use crate::state::{Combatant, Faction};

const fn faction_rank(faction: Faction) -> u8 {
    match faction {
        Faction::Player => 0,
        Faction::Monster => 1,
    }
}

/// Total order used to sort the roster.
pub fn compare_combatants(a: &Combatant, b: &Combatant) -> Ordering {
    faction_rank(a.faction)
        .cmp(&faction_rank(b.faction))
        .then_with(|| a.token_order.cmp(&b.token_order))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts `combatants` into turn order.
pub fn sort_turn_order(combatants: &mut [Combatant]) {
    combatants.sort_by(compare_combatants);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunters_precede_monsters_for_any_clock() {
        let clocks = [-5.0, 0.0, 0.5, 3.0, 12.25, 999.0];
        for &hunter_clock in &clocks {
            for &monster_clock in &clocks {
                let hunter = Combatant::hunter(1, "aiko", 9).with_initiative(hunter_clock);
                let monster = Combatant::monster(2, "rathian", 0).with_initiative(monster_clock);

                assert_eq!(compare_combatants(&hunter, &monster), Ordering::Less);
                assert_eq!(compare_combatants(&monster, &hunter), Ordering::Greater);
            }
        }
    }

    #[test]
    fn same_faction_orders_by_token_not_clock() {
        let mut roster = vec![
            Combatant::hunter(1, "bram", 2).with_initiative(1.0),
            Combatant::monster(2, "rathian", 1).with_initiative(0.0),
            Combatant::hunter(3, "aiko", 1).with_initiative(9.0),
            Combatant::monster(4, "rathalos", 0).with_initiative(7.0),
        ];

        sort_turn_order(&mut roster);

        let order: Vec<u32> = roster.iter().map(|c| c.id.0).collect();
        assert_eq!(order, vec![3, 1, 4, 2]);
    }
}
