//! Undo stack for initiative changes.
//!
//! Every mutating sequencer operation pushes what it is about to overwrite.
//! Read bottom-to-top, the stack replays every initiative change since the
//! encounter started; popping it in reverse restores prior state exactly.
//! Entries are never modified after push.

use crate::state::CombatantId;

/// Initiative value of one combatant at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeRecord {
    pub combatant: CombatantId,
    pub initiative: f64,
}

/// One undo step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HistoryEntry {
    /// Separates the entries of consecutive rounds.
    RoundBoundary,
    /// Every combatant's initiative, taken before a round advance.
    Snapshot(Vec<InitiativeRecord>),
    /// One combatant's initiative, taken before its per-turn clock update.
    SingleUpdate(InitiativeRecord),
}

impl HistoryEntry {
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::RoundBoundary)
    }
}

/// LIFO stack of [`HistoryEntry`] values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnHistoryStack {
    entries: Vec<HistoryEntry>,
}

impl TurnHistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Removes the top entry; `None` means the encounter is at its start.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Index of the most recent round boundary.
    pub fn find_last_boundary_index(&self) -> Option<usize> {
        self.entries.iter().rposition(HistoryEntry::is_boundary)
    }

    /// Drops the entry at `index` and everything above it.
    pub fn truncate(&mut self, index: usize) {
        self.entries.truncate(index);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(id: u32, initiative: f64) -> HistoryEntry {
        HistoryEntry::SingleUpdate(InitiativeRecord {
            combatant: CombatantId(id),
            initiative,
        })
    }

    #[test]
    fn pop_on_empty_signals_start() {
        let mut stack = TurnHistoryStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.find_last_boundary_index(), None);
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = TurnHistoryStack::new();
        stack.push(single(1, 0.0));
        stack.push(HistoryEntry::RoundBoundary);
        stack.push(single(2, 3.5));

        assert_eq!(stack.pop(), Some(single(2, 3.5)));
        assert_eq!(stack.pop(), Some(HistoryEntry::RoundBoundary));
        assert_eq!(stack.pop(), Some(single(1, 0.0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn finds_most_recent_boundary() {
        let mut stack = TurnHistoryStack::new();
        stack.push(HistoryEntry::Snapshot(vec![]));
        stack.push(HistoryEntry::RoundBoundary);
        stack.push(single(1, 1.0));
        stack.push(HistoryEntry::Snapshot(vec![]));
        stack.push(HistoryEntry::RoundBoundary);
        stack.push(single(1, 2.0));
        stack.push(single(2, 2.0));

        assert_eq!(stack.find_last_boundary_index(), Some(4));

        stack.truncate(4);
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.peek(), Some(&HistoryEntry::Snapshot(vec![])));
    }
}
