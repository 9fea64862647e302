//! Forward and backward turn navigation.

use super::{
    ClockOracle, ClockUpdate, CombatError, CombatSequencer, EncounterPhase, HistoryEntry,
    InitiativeRecord, Rewind, RoundAdvance, TurnAdvance, record_of, sort_turn_order,
};

impl CombatSequencer {
    /// `NotStarted → InProgress`: sorts the roster and clears history.
    pub fn start(&mut self) -> Result<(), CombatError> {
        if self.phase != EncounterPhase::NotStarted {
            return Err(CombatError::InvalidState {
                operation: "start the encounter",
                phase: self.phase,
            });
        }
        if self.combatants.is_empty() {
            return Err(CombatError::NoCombatants);
        }

        sort_turn_order(&mut self.combatants);
        self.history.clear();
        self.round = 0;
        self.turn = self.first_eligible();
        self.phase = EncounterPhase::InProgress;

        tracing::info!(combatants = self.combatants.len(), "encounter started");
        Ok(())
    }

    /// `InProgress → Ended`. History is discarded.
    pub fn end(&mut self) -> Result<(), CombatError> {
        self.require_in_progress("end the encounter")?;
        self.phase = EncounterPhase::Ended;
        self.history.clear();
        tracing::info!(round = self.round, "encounter ended");
        Ok(())
    }

    /// Ends the current combatant's turn.
    ///
    /// The combatant's initiative is recorded, then replaced by its actor's
    /// clock (clamped at zero) when `clocks` knows one. Moving past the last
    /// combatant advances the round as well, so undoing such a turn takes two
    /// retreats: one for the round, one for the turn.
    pub fn advance_turn<C>(&mut self, clocks: &C) -> Result<TurnAdvance, CombatError>
    where
        C: ClockOracle + ?Sized,
    {
        self.require_in_progress("advance the turn")?;

        let index = self.turn;
        let combatant = self
            .combatants
            .get_mut(index)
            .ok_or(CombatError::NoCombatants)?;
        let ended = combatant.id;
        self.history
            .push(HistoryEntry::SingleUpdate(record_of(combatant)));

        let clock_update = match clocks.clock(&combatant.actor) {
            Some(clock) => {
                let clock = clock.max(0.0);
                combatant.initiative = clock;
                Some(ClockUpdate {
                    combatant: combatant.id,
                    actor: combatant.actor.clone(),
                    clock,
                })
            }
            None => {
                tracing::debug!(
                    combatant = %combatant.id,
                    actor = %combatant.actor,
                    "actor has no clock, initiative unchanged"
                );
                None
            }
        };

        let new_round = match self.next_eligible_after(index) {
            Some(next) => {
                self.turn = next;
                None
            }
            None => Some(self.advance_round()?),
        };

        tracing::debug!(
            ended = %ended,
            round = self.round,
            turn = self.turn,
            "turn advanced"
        );

        Ok(TurnAdvance {
            ended,
            clock_update,
            new_round,
            round: self.round,
            turn: self.turn,
        })
    }

    /// Snapshots every initiative, marks the boundary and enters the next round.
    pub fn advance_round(&mut self) -> Result<RoundAdvance, CombatError> {
        self.require_in_progress("advance the round")?;

        self.history.push(HistoryEntry::Snapshot(self.initiatives()));
        self.history.push(HistoryEntry::RoundBoundary);
        self.round += 1;
        self.turn = self.first_eligible();

        let advance = RoundAdvance {
            round: self.round,
            stamina_decay: self.config.is_stamina_decay_round(self.round),
        };
        tracing::info!(
            round = advance.round,
            stamina_decay = advance.stamina_decay,
            "round started"
        );
        Ok(advance)
    }

    /// Undoes the most recent turn advance.
    ///
    /// The turn index resets to 0 rather than stepping back by one. Reaching
    /// a round boundary (or an empty history) rewinds the round instead.
    pub fn retreat_turn(&mut self) -> Result<Rewind, CombatError> {
        self.require_in_progress("retreat the turn")?;

        let record = match self.history.peek() {
            Some(HistoryEntry::SingleUpdate(record)) => *record,
            _ => return self.retreat_round(),
        };
        self.history.pop();
        self.restore(&record);
        self.turn = 0;
        tracing::debug!(combatant = %record.combatant, "turn rewound");
        Ok(Rewind::Turn { restored: record })
    }

    /// Undoes the most recent round advance.
    ///
    /// No-op at round 0 or with empty history. Turn entries recorded after
    /// the last boundary belong to the round being left and are discarded.
    pub fn retreat_round(&mut self) -> Result<Rewind, CombatError> {
        self.require_in_progress("retreat the round")?;

        if self.round == 0 || self.history.is_empty() {
            tracing::debug!(round = self.round, "already at encounter start");
            return Ok(Rewind::AtStart);
        }

        let top = self.history.len() - 1;
        let snapshot_index = match self.history.peek() {
            Some(HistoryEntry::Snapshot(_)) => Some(top),
            Some(HistoryEntry::RoundBoundary) => top.checked_sub(1),
            _ => self
                .history
                .find_last_boundary_index()
                .and_then(|boundary| boundary.checked_sub(1)),
        };

        let records = match snapshot_index.and_then(|index| self.history.get(index)) {
            Some(HistoryEntry::Snapshot(records)) => records.clone(),
            _ => {
                tracing::warn!(round = self.round, "turn history out of sync");
                return Err(CombatError::HistoryOutOfSync { round: self.round });
            }
        };
        if let Some(index) = snapshot_index {
            self.history.truncate(index);
        }

        self.rewind_round(records)
    }

    fn rewind_round(&mut self, records: Vec<InitiativeRecord>) -> Result<Rewind, CombatError> {
        if self.round == 0 {
            return Err(CombatError::HistoryOutOfSync { round: 0 });
        }
        for record in &records {
            self.restore(record);
        }
        self.round -= 1;
        self.turn = 0;

        tracing::info!(round = self.round, "round rewound");
        Ok(Rewind::Round {
            round: self.round,
            restored: records,
        })
    }

    fn is_eligible(&self, index: usize) -> bool {
        self.combatants
            .get(index)
            .is_some_and(|c| !(self.config.skip_defeated && c.defeated))
    }

    fn first_eligible(&self) -> usize {
        (0..self.combatants.len())
            .find(|&index| self.is_eligible(index))
            .unwrap_or(0)
    }

    fn next_eligible_after(&self, index: usize) -> Option<usize> {
        (index + 1..self.combatants.len()).find(|&next| self.is_eligible(next))
    }
}
