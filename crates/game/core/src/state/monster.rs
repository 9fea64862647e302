//! Monster sheet: resource pools, body parts, status tracks and damage log.

use std::collections::{HashMap, HashSet};

use crate::config::RulesConfig;
use crate::damage::{decay_status, round_half_up};

use super::damage_log::{DamageLog, DamageLogEntry};
use super::ids::{ActorId, PartId};
use super::part::{Part, PartTemplate};
use super::status::{StatusTrack, StatusTrackSpec};

/// Current / maximum pair for a depletable pool (health, stamina).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Removes `amount`, never going below zero. Returns the new value.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Adds `amount`, never going above the maximum. Returns the new value.
    pub fn restore(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// Typed field update for a monster sheet.
///
/// Engines report these instead of mutating host documents; the host
/// adapter applies a batch atomically.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorUpdate {
    Health(u32),
    Stamina(u32),
    Clock(f64),
    Exhausted(bool),
    Enraged(bool),
    Part { part: PartId, state: Part },
    Status { status: String, state: StatusTrack },
    DamageLog { attacker: String, entry: DamageLogEntry },
}

/// Summary of the once-per-round upkeep applied to a monster.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundTick {
    /// Statuses whose effect ran out during this tick.
    pub expired: Vec<String>,
    pub clock: f64,
    pub stamina_recovered: u32,
    pub updates: Vec<ActorUpdate>,
}

/// A monster ("titan") sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterActor {
    pub id: ActorId,
    pub name: String,
    pub health: ResourceMeter,
    pub stamina: ResourceMeter,
    pub clock: f64,
    pub enraged: bool,
    pub exhausted: bool,
    pub parts: HashMap<PartId, Part>,
    /// Keyed by lowercase element name (`"fire"`, `"poison"`, ...).
    pub statuses: HashMap<String, StatusTrack>,
    pub damage_log: DamageLog,
}

impl MonsterActor {
    pub fn new(id: ActorId, name: impl Into<String>, max_health: u32, max_stamina: u32) -> Self {
        Self {
            id,
            name: name.into(),
            health: ResourceMeter::full(max_health),
            stamina: ResourceMeter::full(max_stamina),
            clock: 0.0,
            enraged: false,
            exhausted: false,
            parts: HashMap::new(),
            statuses: HashMap::new(),
            damage_log: DamageLog::new(),
        }
    }

    /// Adds a part under an explicit key (builder pattern).
    pub fn with_part(mut self, id: impl Into<PartId>, template: PartTemplate) -> Self {
        let part = Part::from_template(template, self.health.maximum);
        self.parts.insert(id.into(), part);
        self
    }

    /// Adds a status track (builder pattern). The key is lowercased.
    pub fn with_status(mut self, status: &str, spec: StatusTrackSpec) -> Self {
        self.statuses
            .insert(status.to_lowercase(), StatusTrack::new(spec));
        self
    }

    /// Adds a part under the first free `PartN` key and returns that key.
    pub fn add_part(&mut self, template: PartTemplate) -> PartId {
        let id = self.next_part_id();
        let part = Part::from_template(template, self.health.maximum);
        self.parts.entry(id.clone()).or_insert(part);
        id
    }

    pub fn remove_part(&mut self, id: &PartId) -> Option<Part> {
        self.parts.remove(id)
    }

    /// First `PartN` key not taken, comparing indices numerically.
    pub fn next_part_id(&self) -> PartId {
        let used: HashSet<usize> = self
            .parts
            .keys()
            .filter_map(|key| key.as_str().strip_prefix("Part")?.parse().ok())
            .collect();

        let index = (0..).find(|index| !used.contains(index)).unwrap_or(used.len());
        PartId::indexed(index)
    }

    pub fn part(&self, id: &PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    /// Case-insensitive status lookup.
    pub fn status(&self, status: &str) -> Option<&StatusTrack> {
        self.statuses.get(&status.to_lowercase())
    }

    /// Changes max health and re-derives every part's limits.
    pub fn set_max_health(&mut self, max_health: u32) {
        self.health.maximum = max_health;
        self.health.current = self.health.current.min(max_health);
        self.recalculate_limits();
    }

    pub fn recalculate_limits(&mut self) {
        let max_health = self.health.maximum;
        for part in self.parts.values_mut() {
            part.recalculate_limits(max_health);
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_empty()
    }

    /// Once-per-round upkeep: status decay, clock countdown, exhausted recovery.
    pub fn tick_round(&mut self, config: &RulesConfig) -> RoundTick {
        let mut tick = RoundTick::default();

        let mut statuses: Vec<_> = self.statuses.iter_mut().collect();
        statuses.sort_by(|a, b| a.0.cmp(b.0));
        for (name, track) in statuses {
            let was_active = track.is_active();
            decay_status(track);
            if was_active && !track.is_active() {
                tick.expired.push(name.clone());
            }
            tick.updates.push(ActorUpdate::Status {
                status: name.clone(),
                state: track.clone(),
            });
        }

        self.clock = (self.clock - 1.0).max(0.0);
        tick.clock = self.clock;
        tick.updates.push(ActorUpdate::Clock(self.clock));

        if self.exhausted {
            let before = self.stamina.current;
            let after = self.stamina.restore(config.exhausted_stamina_recovery);
            tick.stamina_recovered = after - before;
            tick.updates.push(ActorUpdate::Stamina(after));
        }

        tracing::debug!(
            monster = %self.id,
            clock = self.clock,
            expired = ?tick.expired,
            "monster round tick"
        );
        tick
    }

    /// Damage of an attack with base value `base`, boosted while enraged.
    pub fn attack_damage(&self, base: f64, config: &RulesConfig) -> u32 {
        let multiplier = if self.enraged {
            config.enraged_damage_multiplier
        } else {
            1.0
        };
        round_half_up(base * multiplier)
    }

    /// Books an attack: sets the clock and spends stamina.
    ///
    /// Running out of stamina exhausts the monster and ends its enrage.
    pub fn commit_attack(&mut self, clock: f64, stamina_cost: u32) -> Vec<ActorUpdate> {
        let mut updates = Vec::with_capacity(4);

        self.clock = clock;
        updates.push(ActorUpdate::Clock(clock));

        let remaining = self.stamina.deplete(stamina_cost);
        updates.push(ActorUpdate::Stamina(remaining));

        if remaining == 0 {
            self.exhausted = true;
            self.enraged = false;
            updates.push(ActorUpdate::Exhausted(true));
            updates.push(ActorUpdate::Enraged(false));
            tracing::info!(monster = %self.id, "monster exhausted");
        }

        updates
    }
}
