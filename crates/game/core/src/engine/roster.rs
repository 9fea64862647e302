//! Roster changes while an encounter is set up or running.

use crate::state::{Combatant, CombatantId};

use super::{CombatError, CombatSequencer, sort_turn_order};

impl CombatSequencer {
    /// Combatant whose turn it is, if the encounter is running.
    pub fn current(&self) -> Option<&Combatant> {
        if self.phase == super::EncounterPhase::InProgress {
            self.combatants.get(self.turn)
        } else {
            None
        }
    }

    /// Roster in turn order (hunters first).
    pub fn turn_order(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Adds a combatant and re-sorts. The active combatant keeps its turn.
    pub fn add_combatant(&mut self, combatant: Combatant) -> Result<(), CombatError> {
        if self.combatant(combatant.id).is_some() {
            return Err(CombatError::DuplicateCombatant(combatant.id));
        }

        let active = self.combatants.get(self.turn).map(|c| c.id);
        tracing::debug!(combatant = %combatant.id, actor = %combatant.actor, "combatant added");
        self.combatants.push(combatant);
        sort_turn_order(&mut self.combatants);

        if let Some(active) = active {
            self.turn = self.position(active).unwrap_or(self.turn);
        }
        Ok(())
    }

    /// Drops a combatant. The turn index stays on the same slot, clamped to
    /// the new roster length.
    pub fn remove_combatant(&mut self, id: CombatantId) -> Result<Combatant, CombatError> {
        let index = self
            .position(id)
            .ok_or(CombatError::UnknownCombatant(id))?;
        let removed = self.combatants.remove(index);

        if index < self.turn {
            self.turn -= 1;
        }
        self.turn = self.turn.min(self.combatants.len().saturating_sub(1));

        tracing::debug!(combatant = %id, turn = self.turn, "combatant removed");
        Ok(removed)
    }

    pub fn set_defeated(&mut self, id: CombatantId, defeated: bool) -> Result<(), CombatError> {
        self.combatant_mut(id)?.defeated = defeated;
        Ok(())
    }

    pub fn set_hidden(&mut self, id: CombatantId, hidden: bool) -> Result<(), CombatError> {
        self.combatant_mut(id)?.hidden = hidden;
        Ok(())
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, CombatError> {
        self.combatants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CombatError::UnknownCombatant(id))
    }

    fn position(&self, id: CombatantId) -> Option<usize> {
        self.combatants.iter().position(|c| c.id == id)
    }
}
