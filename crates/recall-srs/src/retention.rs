//! Ebbinghaus retention estimate
//!
//! Retention decays exponentially once a card passes its due instant:
//!
//! `R = exp(-k * elapsed_days / stability)`
//!
//! where `stability` is the card's last interval (at least one day) and `k`
//! is [`SchedulerConfig::decay_constant`]. A card at its due instant has
//! `R = 1`; one overdue by a whole interval has `R = e^-k`, below 0.5 for any
//! valid `k`. Cards not yet due clamp to 1.

use chrono::{DateTime, Utc};

use crate::{config::SchedulerConfig, state::SrsState};

/// Shortest stability used by the curve, in days
pub const MIN_STABILITY_DAYS: f64 = 1.0;

/// Probability of recall in `[0, 1]` for `state` at `now`
///
/// Returns exactly 0 for a card that has never been reviewed.
pub fn calculate_retention(state: &SrsState, now: DateTime<Utc>) -> f64 {
    retention_with(&SchedulerConfig::default(), state, now)
}

pub(crate) fn retention_with(config: &SchedulerConfig, state: &SrsState, now: DateTime<Utc>) -> f64 {
    if state.is_new() {
        return 0.0;
    }

    let elapsed = state.elapsed_days(now).max(0.0);
    let retention = (-config.decay_constant * elapsed / stability_days(state)).exp();

    retention.clamp(0.0, 1.0)
}

/// Days the memory trace takes to decay by a factor of `e^k`
///
/// Zero, negative and non-finite intervals fall back to the minimum.
pub(crate) fn stability_days(state: &SrsState) -> f64 {
    if state.interval_days.is_finite() {
        state.interval_days.max(MIN_STABILITY_DAYS)
    } else {
        MIN_STABILITY_DAYS
    }
}
