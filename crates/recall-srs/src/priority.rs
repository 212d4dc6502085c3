//! Priority score used to order review candidates
//!
//! The score is a sum of independent signals, each monotone in one field:
//!
//! * forgetting: `(1 - R) * 100`, grows as retention decays
//! * overdue: signed days past due relative to the card's interval
//! * lapses: every forgotten review adds a fixed boost
//! * ease: lower ease (harder card) scores higher
//! * recency: cards shown moments ago in this session lose a flat amount
//!
//! Scores are only comparable between calls sharing the same `now`.

use chrono::{DateTime, Utc};

use crate::{
    card::CardId,
    config::SchedulerConfig,
    retention::{retention_with, stability_days},
    state::SrsState,
};

const FORGETTING_WEIGHT: f64 = 100.0;
const OVERDUE_WEIGHT: f64 = 10.0;
const LAPSE_WEIGHT: f64 = 5.0;
const EASE_WEIGHT: f64 = 10.0;

/// Flat deduction for a card listed in the session's recent reviews
pub const RECENCY_PENALTY: f64 = 50.0;

/// Relative priority of reviewing `state` at `now`; higher goes first
///
/// `recent_card_ids` lists cards reviewed earlier in the session. Presence
/// anywhere in the list applies [`RECENCY_PENALTY`] once.
pub fn calculate_priority(state: &SrsState, now: DateTime<Utc>, recent_card_ids: &[CardId]) -> f64 {
    priority_with(&SchedulerConfig::default(), state, now, recent_card_ids)
}

pub(crate) fn priority_with(
    config: &SchedulerConfig,
    state: &SrsState,
    now: DateTime<Utc>,
    recent_card_ids: &[CardId],
) -> f64 {
    let forgetting = (1.0 - retention_with(config, state, now)) * FORGETTING_WEIGHT;
    let overdue = state.elapsed_days(now) / stability_days(state) * OVERDUE_WEIGHT;
    let lapses = f64::from(state.lapses) * LAPSE_WEIGHT;
    let ease = (config.max_ease - state.ease_factor) * EASE_WEIGHT;

    let mut priority = forgetting + overdue + lapses + ease;

    if recent_card_ids.contains(&state.card_id) {
        priority -= RECENCY_PENALTY;
    }

    priority
}
