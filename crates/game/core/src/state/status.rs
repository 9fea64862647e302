//! Elemental / ailment buildup tracks on a monster.
//!
//! Buildup accumulates from elemental damage; crossing `current_limit`
//! triggers a timed effect and raises the next threshold:
//!
//! ```text
//! current_limit(k) = step * initial_res + step * next_res * min(k, max_res)
//! ```
//!
//! where `k` is the number of triggers so far and `step` is 50 by default.

/// Authoring parameters of a status track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTrackSpec {
    pub initial_res: u32,
    pub next_res: u32,
    pub max_res: u32,
    /// Controls the effect duration on trigger: `(effectivity + 1) * 2` rounds.
    pub effectivity: u32,
    /// Buildup lost at every round tick.
    pub degradation: u32,
}

/// Live buildup state of one status type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTrack {
    pub value: u32,
    pub current_limit: u32,
    /// Times triggered.
    pub num: u32,
    pub rounds_remaining: u32,
    pub initial_res: u32,
    pub next_res: u32,
    pub max_res: u32,
    pub effectivity: u32,
    pub degradation: u32,
}

impl StatusTrack {
    /// Fresh track with no buildup, using a threshold step of 50.
    pub fn new(spec: StatusTrackSpec) -> Self {
        Self::with_step(spec, crate::config::RulesConfig::DEFAULT_STATUS_LIMIT_STEP)
    }

    /// Fresh track with no buildup and an explicit threshold step.
    pub fn with_step(spec: StatusTrackSpec, step: u32) -> Self {
        let mut track = Self {
            value: 0,
            current_limit: 0,
            num: 0,
            rounds_remaining: 0,
            initial_res: spec.initial_res,
            next_res: spec.next_res,
            max_res: spec.max_res,
            effectivity: spec.effectivity,
            degradation: spec.degradation,
        };
        track.current_limit = track.limit_after(0, step);
        track
    }

    /// Threshold in force after `triggers` triggers.
    pub fn limit_after(&self, triggers: u32, step: u32) -> u32 {
        let escalation = step
            .saturating_mul(self.next_res)
            .saturating_mul(triggers.min(self.max_res));
        step.saturating_mul(self.initial_res).saturating_add(escalation)
    }

    /// Rounds an effect lasts when this track triggers.
    pub fn effect_duration(&self) -> u32 {
        self.effectivity.saturating_add(1).saturating_mul(2)
    }

    pub fn is_active(&self) -> bool {
        self.rounds_remaining > 0
    }
}
