//! Part damage and status buildup.
//!
//! [`apply_damage`] resolves one hit against one body part; [`feed_status`]
//! and [`decay_status`] drive the elemental buildup tracks;
//! [`MonsterActor::take_hit`](crate::state::MonsterActor::take_hit) strings
//! them together with the health pool and the damage log.

mod errors;
mod events;
mod hit;
mod part;
mod status;

pub use errors::DamageError;
pub use events::DamageEvent;
pub use hit::{Hit, HitOutcome, HunterHit, hunter_damage};
pub use part::{PartDamage, apply_damage};
pub use status::{decay_status, feed_status};

/// Rounds half-way values up (`2.5 → 3`), clamping negatives and NaN to 0.
///
/// Sheet math is done in floating point and stored as whole points.
pub fn round_half_up(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u32
}
