/// Rules constants and tunable parameters.
///
/// Defaults reproduce the published rules; tables may override them per
/// campaign through the content loaders.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Every N-th round the hunters lose one point of stamina modifier.
    pub stamina_decay_interval: u32,

    /// Skip defeated combatants when advancing turns.
    pub skip_defeated: bool,

    /// Scale applied to raw damage after the part resistance multiplier.
    pub raw_resistance_scale: f64,

    /// Base step of the status buildup threshold (`step * initial_res`).
    pub status_limit_step: u32,

    /// Raw resistance above which a hit is reported as a weak point.
    pub weak_point_raw_threshold: f64,

    /// Element resistance above which a hit is reported as a weak point.
    pub weak_point_element_threshold: f64,

    /// Damage multiplier for attacks made by an enraged monster.
    pub enraged_damage_multiplier: f64,

    /// Stamina an exhausted monster recovers at every round tick.
    pub exhausted_stamina_recovery: u32,
}

impl RulesConfig {
    pub const DEFAULT_STAMINA_DECAY_INTERVAL: u32 = 10;
    pub const DEFAULT_RAW_RESISTANCE_SCALE: f64 = 0.1;
    pub const DEFAULT_STATUS_LIMIT_STEP: u32 = 50;
    pub const DEFAULT_WEAK_POINT_RAW_THRESHOLD: f64 = 4.0;
    pub const DEFAULT_WEAK_POINT_ELEMENT_THRESHOLD: f64 = 3.0;
    pub const DEFAULT_ENRAGED_DAMAGE_MULTIPLIER: f64 = 1.25;
    pub const DEFAULT_EXHAUSTED_STAMINA_RECOVERY: u32 = 5;

    pub fn new() -> Self {
        Self {
            stamina_decay_interval: Self::DEFAULT_STAMINA_DECAY_INTERVAL,
            skip_defeated: false,
            raw_resistance_scale: Self::DEFAULT_RAW_RESISTANCE_SCALE,
            status_limit_step: Self::DEFAULT_STATUS_LIMIT_STEP,
            weak_point_raw_threshold: Self::DEFAULT_WEAK_POINT_RAW_THRESHOLD,
            weak_point_element_threshold: Self::DEFAULT_WEAK_POINT_ELEMENT_THRESHOLD,
            enraged_damage_multiplier: Self::DEFAULT_ENRAGED_DAMAGE_MULTIPLIER,
            exhausted_stamina_recovery: Self::DEFAULT_EXHAUSTED_STAMINA_RECOVERY,
        }
    }

    pub fn with_stamina_decay_interval(mut self, interval: u32) -> Self {
        self.stamina_decay_interval = interval;
        self
    }

    pub fn with_skip_defeated(mut self, skip_defeated: bool) -> Self {
        self.skip_defeated = skip_defeated;
        self
    }

    /// Returns true when entering `round` should emit the stamina-mod decay notice.
    pub fn is_stamina_decay_round(&self, round: u32) -> bool {
        self.stamina_decay_interval != 0 && round != 0 && round % self.stamina_decay_interval == 0
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
