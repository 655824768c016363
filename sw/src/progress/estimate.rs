//! Time-remaining estimation from successive progress samples.
//!
//! The tracker is a pure rate extrapolation over the two most recent
//! accepted fractions and the wall-clock time between them - not a moving
//! average. The only smoothing is a single-step dampening of projections
//! that jump to more than twice the previous one, which suppresses jitter
//! from brief stalls or bursts in the underlying phase.

use chrono::{DateTime, Utc};

/// Upper bound on the elapsed time fed into one projection, in seconds.
/// Anything longer is treated as a two-hour stall rather than real signal.
pub const MAX_ESTIMATE_SECS: f64 = 7_200.0;

const SECS_IN_MINUTE: f64 = 60.0;

/// Smoothing state carried between progress samples.
///
/// Owned by whoever drives the tracker and reset only at construction.
/// `last_fraction` holds the fraction that was on display before the most
/// recent accepted sample, which is what rate-of-change is computed from.
#[derive(Clone, Debug)]
pub struct EstimateState {
    last_update: DateTime<Utc>,
    last_fraction: f64,
    last_estimate_secs: f64,
}

/// Outcome of feeding one raw sample to the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// The sample did not move the fraction forward; the previous estimate
    /// stands and nothing was stored.
    Stalled,
    /// The fraction advanced and a new smoothed projection was stored.
    Accepted { estimate_secs: f64 },
}

impl EstimateState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_update: now,
            last_fraction: 0.0,
            last_estimate_secs: 0.0,
        }
    }

    /// Feed one raw sample.
    ///
    /// `current` is the ratcheted fraction currently on display and `raw`
    /// the fraction computed from the active phase counters. The stored
    /// timestamp moves to `now` on every call; a sample that does not
    /// advance past `current` changes nothing else.
    pub fn advance(&mut self, current: f64, raw: f64, now: DateTime<Utc>) -> Advance {
        let elapsed = self.elapsed_secs(now);
        if raw <= current {
            return Advance::Stalled;
        }
        self.last_fraction = current;
        let estimate = self.project(elapsed, raw - self.last_fraction);
        self.last_estimate_secs = estimate;
        Advance::Accepted { estimate_secs: estimate }
    }

    /// Seconds since the previous call, clamped to [0, MAX_ESTIMATE_SECS].
    fn elapsed_secs(&mut self, now: DateTime<Utc>) -> f64 {
        let elapsed = (now - self.last_update).num_milliseconds() as f64 / 1_000.0;
        self.last_update = now;
        elapsed.clamp(0.0, MAX_ESTIMATE_SECS)
    }

    /// Linear extrapolation with single-step dampening against >2x swings.
    ///
    /// A non-positive rate reuses the previous projection; the division is
    /// never taken on a zero denominator.
    fn project(&self, elapsed_secs: f64, rate: f64) -> f64 {
        if rate <= 0.0 {
            return self.last_estimate_secs;
        }
        let mut estimate = elapsed_secs / rate;
        if estimate / self.last_estimate_secs > 2.0 {
            estimate = (estimate + self.last_estimate_secs) / 2.0;
        }
        estimate
    }

    pub fn last_estimate_secs(&self) -> f64 {
        self.last_estimate_secs
    }

    pub fn last_fraction(&self) -> f64 {
        self.last_fraction
    }
}

/// Render an estimate for display, e.g. "4 min." or "30 sec.".
///
/// Estimates over a minute round up to whole minutes; anything shorter
/// rounds up to whole seconds with a floor of one second, so the text never
/// claims zero time while work remains.
pub fn eta_text(estimate_secs: f64, minutes_unit: &str, seconds_unit: &str) -> String {
    if estimate_secs > SECS_IN_MINUTE {
        format!("{} {}", (estimate_secs / SECS_IN_MINUTE).ceil(), minutes_unit)
    } else {
        let value = if estimate_secs > 0.0 { estimate_secs.ceil() } else { 1.0 };
        format!("{} {}", value, seconds_unit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_steady_rate_projection() {
        // 0.1 -> 0.2 over 20s projects 200s; ratio to the previous 100s
        // estimate is exactly 2, which does not trip the dampening.
        let mut state = EstimateState {
            last_update: start(),
            last_fraction: 0.0,
            last_estimate_secs: 100.0,
        };
        let advance = state.advance(0.1, 0.2, start() + Duration::seconds(20));
        assert_eq!(advance, Advance::Accepted { estimate_secs: 200.0 });
        assert_eq!(state.last_fraction(), 0.1);
        assert_eq!(state.last_estimate_secs(), 200.0);
    }

    #[test]
    fn test_dampening_halves_large_swings() {
        // Raw projection 50s against a previous 10s estimate (ratio 5)
        // is pulled back to the midpoint.
        let mut state = EstimateState {
            last_update: start(),
            last_fraction: 0.0,
            last_estimate_secs: 10.0,
        };
        let advance = state.advance(0.1, 0.2, start() + Duration::seconds(5));
        assert_eq!(advance, Advance::Accepted { estimate_secs: 30.0 });
    }

    #[test]
    fn test_first_estimate_is_dampened_and_nonzero() {
        let mut state = EstimateState::new(start());
        let advance = state.advance(0.0, 0.25, start() + Duration::seconds(10));
        // elapsed/rate = 40s; the ratio against the zero initial estimate is
        // infinite, so the first projection lands at half the raw value.
        assert_eq!(advance, Advance::Accepted { estimate_secs: 20.0 });
        assert!(state.last_estimate_secs() > 0.0);
    }

    #[test]
    fn test_stalled_sample_keeps_estimate_but_moves_clock() {
        let mut state = EstimateState::new(start());
        assert_eq!(state.advance(0.2, 0.2, start() + Duration::seconds(10)), Advance::Stalled);
        assert_eq!(state.last_estimate_secs(), 0.0);

        // The stalled call consumed the first 10s; only the following 20s
        // count toward the next projection: 20/0.2 = 100, halved to 50 by
        // the first-estimate dampening.
        let advance = state.advance(0.2, 0.4, start() + Duration::seconds(30));
        assert_eq!(advance, Advance::Accepted { estimate_secs: 50.0 });
    }

    #[test]
    fn test_regressing_sample_is_stalled() {
        let mut state = EstimateState::new(start());
        assert_eq!(state.advance(0.5, 0.3, start() + Duration::seconds(5)), Advance::Stalled);
    }

    #[test]
    fn test_elapsed_clamped_at_two_hours() {
        let mut state = EstimateState::new(start());
        let advance = state.advance(0.0, 0.5, start() + Duration::hours(3));
        // clamp(3h) = 7200s, rate 0.5 -> raw 14400s, halved by the
        // first-estimate dampening.
        assert_eq!(advance, Advance::Accepted { estimate_secs: 7_200.0 });
    }

    #[test]
    fn test_zero_rate_reuses_previous_projection() {
        // Unreachable through advance() because of the ratchet, but the
        // guard must hold if the projection is ever fed equal fractions.
        let state = EstimateState {
            last_update: start(),
            last_fraction: 0.3,
            last_estimate_secs: 42.0,
        };
        assert_eq!(state.project(20.0, 0.0), 42.0);
        assert_eq!(state.project(20.0, -0.1), 42.0);
    }

    #[test]
    fn test_eta_text_minutes() {
        assert_eq!(eta_text(200.0, "min.", "sec."), "4 min.");
        assert_eq!(eta_text(61.0, "min.", "sec."), "2 min.");
    }

    #[test]
    fn test_eta_text_seconds() {
        assert_eq!(eta_text(60.0, "min.", "sec."), "60 sec.");
        assert_eq!(eta_text(12.3, "min.", "sec."), "13 sec.");
        assert_eq!(eta_text(0.0, "min.", "sec."), "1 sec.");
    }
}
