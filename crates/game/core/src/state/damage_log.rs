//! Per-attacker ledger of damage dealt to a monster.

use std::collections::HashMap;

/// Damage dealt by one attacker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageLogEntry {
    /// Applied damage amounts in the order they landed.
    pub values: Vec<u32>,
    /// Sum of `values`, recomputed on every record.
    pub total: u64,
}

impl DamageLogEntry {
    /// Recomputes `total` from `values`.
    ///
    /// Hosts may edit `values` directly, so the total is never maintained
    /// incrementally.
    pub fn recompute_total(&mut self) {
        self.total = self.values.iter().map(|&v| u64::from(v)).sum();
    }
}

/// Append-only damage ledger keyed by attacker name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DamageLog {
    entries: HashMap<String, DamageLogEntry>,
}

impl DamageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `amount` to the attacker's entry, creating it on first damage.
    ///
    /// Returns the updated entry.
    pub fn record(&mut self, attacker: &str, amount: u32) -> &DamageLogEntry {
        let entry = self.entries.entry(attacker.to_owned()).or_default();
        entry.values.push(amount);
        entry.recompute_total();
        tracing::trace!(attacker, amount, total = entry.total, "damage recorded");
        entry
    }

    pub fn entry(&self, attacker: &str) -> Option<&DamageLogEntry> {
        self.entries.get(attacker)
    }

    /// Mutable access for host-side corrections; call
    /// [`DamageLogEntry::recompute_total`] afterwards or record again.
    pub fn entry_mut(&mut self, attacker: &str) -> Option<&mut DamageLogEntry> {
        self.entries.get_mut(attacker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DamageLogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attackers ordered by total damage, highest first (ties by name).
    pub fn ranking(&self) -> Vec<(&str, u64)> {
        let mut ranking: Vec<_> = self.iter().map(|(name, e)| (name, e.total)).collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_creates_entry() {
        let mut log = DamageLog::new();
        let entry = log.record("Aiko", 42);
        assert_eq!(entry.values, vec![42]);
        assert_eq!(entry.total, 42);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn total_is_recomputed_after_external_edit() {
        let mut log = DamageLog::new();
        log.record("Aiko", 10);
        log.record("Aiko", 20);

        // Host corrects a mistyped value without touching the total.
        log.entry_mut("Aiko").unwrap().values[0] = 15;
        let entry = log.record("Aiko", 5);

        assert_eq!(entry.values, vec![15, 20, 5]);
        assert_eq!(entry.total, 40);
    }

    #[test]
    fn ranking_orders_by_total() {
        let mut log = DamageLog::new();
        log.record("Bram", 10);
        log.record("Aiko", 30);
        log.record("Cass", 10);

        assert_eq!(log.ranking(), vec![("Aiko", 30), ("Bram", 10), ("Cass", 10)]);
    }
}
