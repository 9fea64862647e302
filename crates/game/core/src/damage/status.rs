use crate::state::StatusTrack;

use super::DamageEvent;

/// Adds `element_damage` to a buildup track and triggers it when the
/// threshold is reached.
///
/// On trigger the buildup resets, the trigger count increases, the threshold
/// escalates and the effect timer restarts at `(effectivity + 1) * 2` rounds.
pub fn feed_status(
    name: &str,
    track: &mut StatusTrack,
    element_damage: u32,
    step: u32,
) -> Option<DamageEvent> {
    track.value = track.value.saturating_add(element_damage);
    if track.value < track.current_limit {
        return None;
    }

    track.num += 1;
    track.value = 0;
    track.current_limit = track.limit_after(track.num, step);
    track.rounds_remaining = track.effect_duration();

    tracing::info!(
        status = name,
        num = track.num,
        next_limit = track.current_limit,
        rounds = track.rounds_remaining,
        "status triggered"
    );

    Some(DamageEvent::StatusTriggered {
        status: name.to_owned(),
        num: track.num,
        rounds: track.rounds_remaining,
    })
}

/// Per-round decay: one round off the effect timer, `degradation` off the buildup.
pub fn decay_status(track: &mut StatusTrack) {
    track.rounds_remaining = track.rounds_remaining.saturating_sub(1);
    track.value = track.value.saturating_sub(track.degradation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusTrackSpec;

    fn track(initial_res: u32, next_res: u32, max_res: u32) -> StatusTrack {
        StatusTrack::new(StatusTrackSpec {
            initial_res,
            next_res,
            max_res,
            effectivity: 1,
            degradation: 15,
        })
    }

    #[test]
    fn single_trigger_escalates_threshold() {
        let mut poison = track(1, 1, 3);
        assert_eq!(poison.current_limit, 50);

        let event = feed_status("poison", &mut poison, 60, 50);

        assert_eq!(
            event,
            Some(DamageEvent::StatusTriggered {
                status: "poison".to_owned(),
                num: 1,
                rounds: 4
            })
        );
        assert_eq!(poison.num, 1);
        assert_eq!(poison.value, 0);
        assert_eq!(poison.current_limit, 100);
        assert_eq!(poison.rounds_remaining, 4);
    }

    #[test]
    fn below_threshold_only_accumulates() {
        let mut sleep = track(2, 1, 2);
        assert_eq!(feed_status("sleep", &mut sleep, 60, 50), None);
        assert_eq!(feed_status("sleep", &mut sleep, 39, 50), None);
        assert_eq!(sleep.value, 99);
        assert_eq!(sleep.num, 0);
    }

    #[test]
    fn limit_after_n_triggers_matches_formula() {
        let (initial_res, next_res, max_res) = (2, 3, 2);
        let mut blast = track(initial_res, next_res, max_res);

        for n in 1..=6 {
            let needed = blast.current_limit;
            assert!(feed_status("blast", &mut blast, needed, 50).is_some());
            assert_eq!(blast.num, n);
            assert_eq!(
                blast.current_limit,
                50 * initial_res + 50 * next_res * n.min(max_res)
            );
        }
    }

    #[test]
    fn oversized_resistances_and_buildup_saturate() {
        let mut dragon = track(u32::MAX, u32::MAX, 5);
        assert_eq!(dragon.current_limit, u32::MAX);

        assert_eq!(feed_status("dragon", &mut dragon, u32::MAX - 1, 50), None);
        assert!(feed_status("dragon", &mut dragon, u32::MAX, 50).is_some());
        assert_eq!(dragon.current_limit, u32::MAX);
    }

    #[test]
    fn decay_floors_at_zero() {
        let mut para = track(1, 1, 1);
        para.value = 10;
        para.rounds_remaining = 2;

        decay_status(&mut para);
        assert_eq!((para.value, para.rounds_remaining), (0, 1));

        decay_status(&mut para);
        decay_status(&mut para);
        assert_eq!((para.value, para.rounds_remaining), (0, 0));
    }
}
