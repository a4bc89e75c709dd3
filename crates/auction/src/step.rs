//! Clock-to-step mapping

use crate::types::{AuctionConfig, Clock, StepIndex};

/// Map a raw clock value to its 1-based step.
///
/// `step = ceil(elapsed / step_duration)` where `elapsed` is clamped to the
/// auction duration. A result of 0 (the start clock itself) belongs to step 1,
/// as do clock values before `start_clock`.
///
/// Callers check [`AuctionConfig::is_closed_at`] separately; the clamp only
/// keeps indexing bounded past the end of the window.
pub fn step_for(config: &AuctionConfig, clock: Clock) -> StepIndex {
    let elapsed = clock
        .saturating_sub(config.start_clock)
        .min(config.duration);
    let step_duration = config.step_duration.max(1);

    elapsed.div_ceil(step_duration).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_config;

    #[test]
    fn test_step_assignment() {
        let config = sample_config();
        for (clock, expected) in [
            (0, 1),
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 2),
            (5, 2),
            (6, 2),
            (7, 3),
            (9, 3),
            (10, 4),
        ] {
            assert_eq!(step_for(&config, clock), expected, "clock {clock}");
        }
    }

    #[test]
    fn test_step_clamps_past_end() {
        let config = sample_config();
        assert_eq!(step_for(&config, 11), 4);
        assert_eq!(step_for(&config, u64::MAX), 4);
    }

    #[test]
    fn test_step_before_start_is_first() {
        let config = AuctionConfig {
            start_clock: 100,
            ..sample_config()
        };
        assert_eq!(step_for(&config, 50), 1);
        assert_eq!(step_for(&config, 100), 1);
        assert_eq!(step_for(&config, 104), 2);
    }
}
